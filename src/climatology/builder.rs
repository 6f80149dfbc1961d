//! Builds the day-of-year baseline climatology from the reference window.

use crate::climdex::ClimdexConfig;
use crate::error::ClimdexError;
use crate::types::frames::climatology_frame::ClimatologyLazyFrame;
use crate::types::frames::series_frame::SeriesLazyFrame;
use log::warn;
use polars::prelude::{col, lit, IntoLazy, QuantileMethod, SortMultipleOptions};

/// Computes the per-day-of-year statistics of the configured reference
/// window and materializes them.
///
/// For each `doy` bucket: arithmetic mean and sample (ddof = 1) standard
/// deviation of `tmax`/`tmin`/`tmed`, plus the configured low/high
/// percentiles of `tmax` and `tmin` with linear interpolation between order
/// statistics. A bucket with a single sample gets a null standard
/// deviation. The result is a pure function of the reference subset; the
/// whole table is rebuilt whenever the window changes.
pub fn build_climatology(
    series: &SeriesLazyFrame,
    config: &ClimdexConfig,
) -> Result<ClimatologyLazyFrame, ClimdexError> {
    let reference = series.for_years(config.reference_start, config.reference_end);
    let table = reference
        .frame
        .group_by([col("doy")])
        .agg([
            col("tmax").mean().alias("tmax_mean"),
            col("tmax").std(1).alias("tmax_std"),
            col("tmax")
                .quantile(lit(config.cold_percentile), QuantileMethod::Linear)
                .alias("tmax_p10"),
            col("tmax")
                .quantile(lit(config.hot_percentile), QuantileMethod::Linear)
                .alias("tmax_p90"),
            col("tmin").mean().alias("tmin_mean"),
            col("tmin").std(1).alias("tmin_std"),
            col("tmin")
                .quantile(lit(config.cold_percentile), QuantileMethod::Linear)
                .alias("tmin_p10"),
            col("tmin")
                .quantile(lit(config.hot_percentile), QuantileMethod::Linear)
                .alias("tmin_p90"),
            col("tmed").mean().alias("tmed_mean"),
            col("tmed").std(1).alias("tmed_std"),
        ])
        .sort(["doy"], SortMultipleOptions::default())
        .collect()?;

    if table.height() == 0 {
        warn!(
            "Reference window {}-{} contains no records; climatology is empty",
            config.reference_start, config.reference_end
        );
    }
    Ok(ClimatologyLazyFrame::new(table.lazy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climdex::Climdex;
    use crate::types::raw_row::RawDailyRow;
    use polars::prelude::DataFrame;

    fn engine(start: i32, end: i32) -> Climdex {
        Climdex::builder()
            .reference_start(start)
            .reference_end(end)
            .build()
    }

    fn build(rows: &[RawDailyRow], start: i32, end: i32) -> DataFrame {
        let engine = engine(start, end);
        let series = engine.normalize(rows).unwrap();
        engine.climatology(&series).unwrap().collect().unwrap()
    }

    fn f64_at(df: &DataFrame, name: &str, idx: usize) -> Option<f64> {
        df.column(name).unwrap().f64().unwrap().get(idx)
    }

    #[test]
    fn known_bucket_statistics() {
        // Jan 1 over four reference years: tmax 10, 20, 30, 40.
        let rows: Vec<RawDailyRow> = (0..4)
            .map(|i| RawDailyRow::new(1991 + i, "01-01", 10.0 * (i + 1) as f64, 5.0))
            .collect();
        let df = build(&rows, 1991, 1994);
        assert_eq!(df.height(), 1);

        assert!((f64_at(&df, "tmax_mean", 0).unwrap() - 25.0).abs() < 1e-12);
        // Sample std of [10, 20, 30, 40] is sqrt(500/3).
        let expected_std = (500.0f64 / 3.0).sqrt();
        assert!((f64_at(&df, "tmax_std", 0).unwrap() - expected_std).abs() < 1e-12);
        // Linear interpolation between order statistics (numpy default):
        // h = (n-1)p, so p10 = 13.0 and p90 = 37.0.
        assert!((f64_at(&df, "tmax_p10", 0).unwrap() - 13.0).abs() < 1e-12);
        assert!((f64_at(&df, "tmax_p90", 0).unwrap() - 37.0).abs() < 1e-12);
    }

    #[test]
    fn records_outside_the_window_are_excluded() {
        let mut rows: Vec<RawDailyRow> = (0..4)
            .map(|i| RawDailyRow::new(1991 + i, "01-01", 20.0, 10.0))
            .collect();
        rows.push(RawDailyRow::new(1950, "01-01", 99.0, 99.0));
        rows.push(RawDailyRow::new(2024, "01-01", 99.0, 99.0));
        let df = build(&rows, 1991, 1994);
        assert_eq!(df.height(), 1);
        assert_eq!(f64_at(&df, "tmax_mean", 0), Some(20.0));
    }

    #[test]
    fn percentiles_bracket_the_mean() {
        let mut rows = Vec::new();
        for year in 1991..=2000 {
            for day in 1..=10 {
                let spread = ((year * 31 + day * 7) % 11) as f64;
                rows.push(RawDailyRow::new(
                    year,
                    format!("06-{:02}", day),
                    25.0 + spread,
                    15.0 - spread,
                ));
            }
        }
        let df = build(&rows, 1991, 2000);
        assert_eq!(df.height(), 10);
        for idx in 0..df.height() {
            for variable in ["tmax", "tmin"] {
                let p10 = f64_at(&df, &format!("{variable}_p10"), idx).unwrap();
                let mean = f64_at(&df, &format!("{variable}_mean"), idx).unwrap();
                let p90 = f64_at(&df, &format!("{variable}_p90"), idx).unwrap();
                assert!(p10 <= mean && mean <= p90, "{variable} bucket {idx}");
            }
        }
    }

    #[test]
    fn single_sample_bucket_has_undefined_std() {
        // Day 366 exists only in 1992 within this window.
        let rows = vec![
            RawDailyRow::new(1992, "12-31", 20.0, 10.0),
            RawDailyRow::new(1991, "12-31", 18.0, 8.0),
        ];
        let df = build(&rows, 1991, 1992);
        assert_eq!(df.height(), 2);
        let doy = df.column("doy").unwrap().i32().unwrap();
        assert_eq!(doy.get(0), Some(365));
        assert_eq!(doy.get(1), Some(366));
        // One sample on day 366: mean defined, sample std undefined.
        assert_eq!(f64_at(&df, "tmax_mean", 1), Some(20.0));
        assert_eq!(f64_at(&df, "tmax_std", 1), None);
        assert_eq!(f64_at(&df, "tmax_std", 0), None);
    }

    #[test]
    fn builder_is_deterministic() {
        let mut rows = Vec::new();
        for year in 1991..=1995 {
            for day in 1..=20 {
                rows.push(RawDailyRow::new(
                    year,
                    format!("03-{:02}", day),
                    15.0 + ((year + day) % 9) as f64,
                    5.0 + ((year * day) % 5) as f64,
                ));
            }
        }
        let first = build(&rows, 1991, 1995);
        let second = build(&rows, 1991, 1995);
        assert!(first.equals_missing(&second));
    }

    #[test]
    fn empty_reference_window_is_not_fatal() {
        let rows = vec![RawDailyRow::new(2024, "01-01", 20.0, 10.0)];
        let df = build(&rows, 1991, 2020);
        assert_eq!(df.height(), 0);
    }
}
