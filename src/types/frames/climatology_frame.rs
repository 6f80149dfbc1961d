//! Contains the `ClimatologyLazyFrame` structure for lazy operations on the
//! day-of-year baseline table.

use crate::error::ClimdexError;
use crate::types::frames::extract::{get_opt_f64, get_opt_i32};
use crate::types::normals::DayOfYearNormals;
use polars::prelude::{col, lit, DataFrame, Expr, LazyFrame};

/// A wrapper around a Polars `LazyFrame` holding the reference-window
/// climatology, one row per day-of-year present in the reference subset.
///
/// Schema: `doy` (Int32) plus `tmax_mean`, `tmax_std`, `tmax_p10`,
/// `tmax_p90`, `tmin_mean`, `tmin_std`, `tmin_p10`, `tmin_p90`, `tmed_mean`,
/// `tmed_std` (Float64, nullable). The percentile columns keep their
/// canonical `p10`/`p90` names even when the engine is configured with
/// different percentile levels.
///
/// The table is materialized once by [`crate::Climdex::climatology`] and is
/// read-only input to the classifier; day 366 appears only when the
/// reference window contains leap years.
#[derive(Clone)]
pub struct ClimatologyLazyFrame {
    /// The underlying Polars LazyFrame containing the climatology.
    pub frame: LazyFrame,
}

impl ClimatologyLazyFrame {
    /// Wraps a `LazyFrame` assumed to carry the climatology schema.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Applies an arbitrary Polars predicate, returning a new
    /// `ClimatologyLazyFrame`. The original is unchanged.
    pub fn filter(&self, predicate: Expr) -> ClimatologyLazyFrame {
        ClimatologyLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Filters the climatology to a single day-of-year bucket. Collecting
    /// the result yields zero or one row.
    pub fn get_at(&self, doy: u32) -> ClimatologyLazyFrame {
        self.filter(col("doy").eq(lit(doy as i32)))
    }

    /// Executes the lazy plan and returns the materialized climatology.
    pub fn collect(&self) -> Result<DataFrame, ClimdexError> {
        Ok(self.frame.clone().collect()?)
    }

    /// Collects the climatology into typed [`DayOfYearNormals`] rows.
    pub fn collect_normals(&self) -> Result<Vec<DayOfYearNormals>, ClimdexError> {
        let df = self.collect()?;
        let column = |name: &str| {
            df.column(name)
                .map_err(|e| ClimdexError::ColumnNotFound(name.to_string(), e))
        };

        let doy = column("doy")?;
        let tmax_mean = column("tmax_mean")?;
        let tmax_std = column("tmax_std")?;
        let tmax_p10 = column("tmax_p10")?;
        let tmax_p90 = column("tmax_p90")?;
        let tmin_mean = column("tmin_mean")?;
        let tmin_std = column("tmin_std")?;
        let tmin_p10 = column("tmin_p10")?;
        let tmin_p90 = column("tmin_p90")?;
        let tmed_mean = column("tmed_mean")?;
        let tmed_std = column("tmed_std")?;

        let mut normals = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let Some(doy) = get_opt_i32(doy, idx) else {
                continue;
            };
            normals.push(DayOfYearNormals {
                doy: doy as u32,
                tmax_mean: get_opt_f64(tmax_mean, idx),
                tmax_std: get_opt_f64(tmax_std, idx),
                tmax_p10: get_opt_f64(tmax_p10, idx),
                tmax_p90: get_opt_f64(tmax_p90, idx),
                tmin_mean: get_opt_f64(tmin_mean, idx),
                tmin_std: get_opt_f64(tmin_std, idx),
                tmin_p10: get_opt_f64(tmin_p10, idx),
                tmin_p90: get_opt_f64(tmin_p90, idx),
                tmed_mean: get_opt_f64(tmed_mean, idx),
                tmed_std: get_opt_f64(tmed_std, idx),
            });
        }
        Ok(normals)
    }
}
