//! Small helpers for pulling typed values out of collected columns.

use chrono::{Duration, NaiveDate};
use polars::prelude::Column;

pub(crate) fn get_opt_f64(column: &Column, idx: usize) -> Option<f64> {
    column.f64().ok().and_then(|ca| ca.get(idx))
}

pub(crate) fn get_opt_i32(column: &Column, idx: usize) -> Option<i32> {
    column.i32().ok().and_then(|ca| ca.get(idx))
}

pub(crate) fn get_flag(column: &Column, idx: usize) -> bool {
    column.bool().ok().and_then(|ca| ca.get(idx)).unwrap_or(false)
}

/// Converts a physical Date value (days since the Unix epoch) back to a
/// `NaiveDate`.
pub(crate) fn date_from_days(days: i32) -> NaiveDate {
    NaiveDate::default() + Duration::days(days as i64)
}
