//! Contains the `SeriesLazyFrame` structure for lazy operations on the
//! normalized daily series.

use crate::error::ClimdexError;
use crate::types::year::Year;
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataFrame, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding the normalized daily series.
///
/// Schema: `date` (Date), `year`, `month`, `doy` (Int32), `tmax`, `tmin`,
/// `tmed` (Float64). The series holds exactly one row per date, sorted
/// ascending, with `tmed` always derived as `(tmax + tmin) / 2`.
///
/// Instances are produced by [`crate::Climdex::normalize`].
///
/// # Example
///
/// ```
/// use climdex::{Climdex, RawDailyRow};
///
/// let rows = vec![
///     RawDailyRow::new(2001, "01-02", 30.0, 20.0),
///     RawDailyRow::new(2001, "01-01", 28.0, 18.0),
/// ];
/// let engine = Climdex::builder().build();
/// let series = engine.normalize(&rows)?;
/// let df = series.collect()?;
/// assert_eq!(df.height(), 2);
/// # Ok::<(), climdex::ClimdexError>(())
/// ```
#[derive(Clone)]
pub struct SeriesLazyFrame {
    /// The underlying Polars LazyFrame containing the normalized series.
    pub frame: LazyFrame,
}

impl SeriesLazyFrame {
    /// Wraps a `LazyFrame` assumed to carry the normalized-series schema.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary Polars predicate, returning a new
    /// `SeriesLazyFrame`. The original is unchanged.
    pub fn filter(&self, predicate: Expr) -> SeriesLazyFrame {
        SeriesLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Restricts the series to dates within `start..=end`.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> SeriesLazyFrame {
        self.filter(
            col("date")
                .gt_eq(lit(start))
                .and(col("date").lt_eq(lit(end))),
        )
    }

    /// Restricts the series to one calendar year.
    pub fn for_year(&self, year: Year) -> SeriesLazyFrame {
        self.filter(col("year").eq(lit(year.get())))
    }

    /// Restricts the series to the calendar years `start..=end` inclusive.
    /// This is the subset the climatology is built from.
    pub fn for_years(&self, start: Year, end: Year) -> SeriesLazyFrame {
        self.filter(
            col("year")
                .gt_eq(lit(start.get()))
                .and(col("year").lt_eq(lit(end.get()))),
        )
    }

    /// Executes the lazy plan and returns the materialized series.
    pub fn collect(&self) -> Result<DataFrame, ClimdexError> {
        Ok(self.frame.clone().collect()?)
    }
}
