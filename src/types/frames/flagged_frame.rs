//! Contains the `FlaggedLazyFrame` structure for lazy operations on the
//! classified (baseline-joined) daily series.

use crate::error::ClimdexError;
use crate::types::flagged_day::FlaggedDay;
use crate::types::frames::extract::{date_from_days, get_flag, get_opt_f64, get_opt_i32};
use crate::types::season::Season;
use crate::types::year::Year;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataFrame, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding the flagged series: the
/// full normalized series joined to its day-of-year baseline, with anomaly
/// and extreme-flag columns.
///
/// On top of the normalized-series schema this carries the climatology join
/// columns, `anomaly_tmax` / `anomaly_tmin` (nullable), the non-null boolean
/// flags `hot_extreme` / `cold_extreme` / `summer_day`, and `season`.
///
/// This frame is the single source of truth for both the wave segmenter and
/// the index aggregator; it is produced once by [`crate::Climdex::classify`]
/// and never updated incrementally.
#[derive(Clone)]
pub struct FlaggedLazyFrame {
    /// The underlying Polars LazyFrame containing the flagged series.
    pub frame: LazyFrame,
}

impl FlaggedLazyFrame {
    /// Wraps a `LazyFrame` assumed to carry the flagged-series schema.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary Polars predicate, returning a new
    /// `FlaggedLazyFrame`. The original is unchanged.
    pub fn filter(&self, predicate: Expr) -> FlaggedLazyFrame {
        FlaggedLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Restricts the flagged series to dates within `start..=end`.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> FlaggedLazyFrame {
        self.filter(
            col("date")
                .gt_eq(lit(start))
                .and(col("date").lt_eq(lit(end))),
        )
    }

    /// Restricts the flagged series to one calendar year.
    pub fn for_year(&self, year: Year) -> FlaggedLazyFrame {
        self.filter(col("year").eq(lit(year.get())))
    }

    /// Executes the lazy plan and returns the materialized flagged series.
    pub fn collect(&self) -> Result<DataFrame, ClimdexError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Collects the flagged series into typed [`FlaggedDay`] rows.
    pub fn collect_days(&self) -> Result<Vec<FlaggedDay>, ClimdexError> {
        let df = self.collect()?;
        let column = |name: &str| {
            df.column(name)
                .map_err(|e| ClimdexError::ColumnNotFound(name.to_string(), e))
        };

        let date = column("date")?
            .date()
            .map_err(|e| ClimdexError::ColumnNotFound("date".to_string(), e))?;
        let season = column("season")?
            .str()
            .map_err(|e| ClimdexError::ColumnNotFound("season".to_string(), e))?;
        let year = column("year")?;
        let month = column("month")?;
        let doy = column("doy")?;
        let tmax = column("tmax")?;
        let tmin = column("tmin")?;
        let tmed = column("tmed")?;
        let anomaly_tmax = column("anomaly_tmax")?;
        let anomaly_tmin = column("anomaly_tmin")?;
        let hot_extreme = column("hot_extreme")?;
        let cold_extreme = column("cold_extreme")?;
        let summer_day = column("summer_day")?;

        let mut days = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let Some(days_since_epoch) = date.get(idx) else {
                continue;
            };
            let Some(season) = season.get(idx).and_then(Season::from_abbrev) else {
                continue;
            };
            days.push(FlaggedDay {
                date: date_from_days(days_since_epoch),
                year: get_opt_i32(year, idx).unwrap_or_default(),
                month: get_opt_i32(month, idx).unwrap_or_default() as u32,
                season,
                doy: get_opt_i32(doy, idx).unwrap_or_default() as u32,
                tmax: get_opt_f64(tmax, idx),
                tmin: get_opt_f64(tmin, idx),
                tmed: get_opt_f64(tmed, idx),
                anomaly_tmax: get_opt_f64(anomaly_tmax, idx),
                anomaly_tmin: get_opt_f64(anomaly_tmin, idx),
                hot_extreme: get_flag(hot_extreme, idx),
                cold_extreme: get_flag(cold_extreme, idx),
                summer_day: get_flag(summer_day, idx),
            });
        }
        Ok(days)
    }
}
