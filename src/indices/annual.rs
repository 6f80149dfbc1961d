//! Annual ETCCDI-style indices and percentage indices.

use crate::climdex::ClimdexConfig;
use crate::error::ClimdexError;
use crate::types::frames::flagged_frame::FlaggedLazyFrame;
use polars::prelude::{col, len, lit, DataFrame, DataType, SortMultipleOptions};

/// Computes the annual ETCCDI-style index table, one row per year:
/// `txx`/`txn` (max/min of tmax), `tnx`/`tnn` (max/min of tmin), the
/// threshold counts `fd` (tmin below the frost threshold), `tr` (tmin above
/// the tropical-night threshold) and `id` (tmax below the icing threshold),
/// `dtr` (difference of the per-year means of tmax and tmin — not a
/// per-day difference averaged), and the percentage indices `tx90p` /
/// `tn10p`.
pub fn annual_indices(
    flagged: &FlaggedLazyFrame,
    config: &ClimdexConfig,
) -> Result<DataFrame, ClimdexError> {
    let df = flagged
        .frame
        .clone()
        .group_by([col("year")])
        .agg([
            col("tmax").max().alias("txx"),
            col("tmax").min().alias("txn"),
            col("tmin").max().alias("tnx"),
            col("tmin").min().alias("tnn"),
            col("tmin")
                .lt(lit(config.frost_threshold))
                .sum()
                .cast(DataType::UInt32)
                .alias("fd"),
            col("tmin")
                .gt(lit(config.tropical_night_threshold))
                .sum()
                .cast(DataType::UInt32)
                .alias("tr"),
            col("tmax")
                .lt(lit(config.icing_threshold))
                .sum()
                .cast(DataType::UInt32)
                .alias("id"),
            (col("tmax").mean() - col("tmin").mean()).alias("dtr"),
            percentage(col("hot_extreme")).alias("tx90p"),
            percentage(col("cold_extreme")).alias("tn10p"),
        ])
        .sort(["year"], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

/// Computes the annual percentage-index table (`year`, `tx90p`, `tn10p`):
/// the share of hot/cold extreme days among that year's records, in
/// percent.
pub fn percentage_indices(flagged: &FlaggedLazyFrame) -> Result<DataFrame, ClimdexError> {
    let df = flagged
        .frame
        .clone()
        .group_by([col("year")])
        .agg([
            percentage(col("hot_extreme")).alias("tx90p"),
            percentage(col("cold_extreme")).alias("tn10p"),
        ])
        .sort(["year"], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

fn percentage(flag: polars::prelude::Expr) -> polars::prelude::Expr {
    flag.sum().cast(DataType::Float64) / len().cast(DataType::Float64) * lit(100.0)
}
