//! Seasonal extreme-day counts and mean anomalies.

use crate::error::ClimdexError;
use crate::types::frames::flagged_frame::FlaggedLazyFrame;
use polars::prelude::{col, DataFrame, DataType, SortMultipleOptions};

/// Computes the seasonal summary table, one row per (year, season):
/// the number of hot/cold extreme days and the mean tmax/tmin anomalies.
///
/// Seasons follow the month mapping attached by the classifier, where
/// December of year Y counts into DJF of year Y itself. That splits
/// meteorological winters across calendar-year boundaries; the convention
/// is preserved deliberately rather than shifted to a winter year.
pub fn seasonal_summary(flagged: &FlaggedLazyFrame) -> Result<DataFrame, ClimdexError> {
    let df = flagged
        .frame
        .clone()
        .group_by([col("year"), col("season")])
        .agg([
            col("hot_extreme")
                .sum()
                .cast(DataType::UInt32)
                .alias("hot_days"),
            col("cold_extreme")
                .sum()
                .cast(DataType::UInt32)
                .alias("cold_days"),
            col("anomaly_tmax").mean().alias("anomaly_tmax_mean"),
            col("anomaly_tmin").mean().alias("anomaly_tmin_mean"),
        ])
        .sort(["year", "season"], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}
