//! Builds the normalized daily series frame from raw input rows.

use crate::calendar::resolve::resolve_date;
use crate::error::ClimdexError;
use crate::types::frames::series_frame::SeriesLazyFrame;
use crate::types::raw_row::RawDailyRow;
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::{col, lit, Column, DataFrame, DataType, DateChunked, IntoColumn, IntoLazy};
use std::collections::HashSet;

/// Normalizes raw rows into the canonical daily series.
///
/// Per record: the month-day indicator is resolved against the year column
/// (February 29 truncating to February 28 outside leap years); records whose
/// month-day cannot be resolved are dropped. Records normalizing to the same
/// date collapse to the first occurrence in input order. The surviving rows
/// are sorted ascending by date, and `tmed`, `year`, `month` and `doy` are
/// derived.
pub fn normalize_series(rows: &[RawDailyRow]) -> Result<SeriesLazyFrame, ClimdexError> {
    let mut resolved: Vec<(NaiveDate, f64, f64)> = Vec::with_capacity(rows.len());
    let mut malformed = 0usize;
    for row in rows {
        match resolve_date(row.year, &row.month_day) {
            Ok(date) => resolved.push((date, row.tmax, row.tmin)),
            Err(e) => {
                malformed += 1;
                debug!("Dropping record (year {}): {}", row.year, e);
            }
        }
    }
    if malformed > 0 {
        warn!(
            "Dropped {} of {} records with unresolvable dates",
            malformed,
            rows.len()
        );
    }

    let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(resolved.len());
    let before_dedup = resolved.len();
    resolved.retain(|(date, _, _)| seen.insert(*date));
    let duplicates = before_dedup - resolved.len();
    if duplicates > 0 {
        warn!("Collapsed {} duplicate dates (first occurrence kept)", duplicates);
    }

    resolved.sort_by_key(|(date, _, _)| *date);
    if resolved.is_empty() {
        warn!("Normalization produced an empty series");
    }

    let date = DateChunked::from_naive_date(
        "date".into(),
        resolved.iter().map(|(date, _, _)| *date),
    )
    .into_column();
    let tmax = Column::new(
        "tmax".into(),
        resolved.iter().map(|(_, tmax, _)| *tmax).collect::<Vec<f64>>(),
    );
    let tmin = Column::new(
        "tmin".into(),
        resolved.iter().map(|(_, _, tmin)| *tmin).collect::<Vec<f64>>(),
    );

    let frame = DataFrame::new(vec![date, tmax, tmin])?
        .lazy()
        .with_columns([
            ((col("tmax") + col("tmin")) / lit(2.0)).alias("tmed"),
            col("date").dt().year().cast(DataType::Int32).alias("year"),
            col("date").dt().month().cast(DataType::Int32).alias("month"),
            col("date").dt().ordinal_day().cast(DataType::Int32).alias("doy"),
        ]);
    Ok(SeriesLazyFrame::new(frame))
}
