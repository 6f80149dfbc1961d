use serde::{Deserialize, Serialize};

/// One raw input row, in the fixed column order of the source dataset:
/// year, month-day indicator, daily maximum temperature, daily minimum
/// temperature.
///
/// The month-day indicator carries no trustworthy year of its own; the
/// calendar normalizer combines it with the `year` column (see
/// [`crate::resolve_date`]). Temperatures are expected to come from an
/// upstream cleaning step and be gap-free; adapting other input shapes is
/// the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDailyRow {
    pub year: i32,
    pub month_day: String,
    pub tmax: f64,
    pub tmin: f64,
}

impl RawDailyRow {
    pub fn new(year: i32, month_day: impl Into<String>, tmax: f64, tmin: f64) -> Self {
        Self {
            year,
            month_day: month_day.into(),
            tmax,
            tmin,
        }
    }
}
