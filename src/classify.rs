//! Joins each day to its day-of-year baseline and derives anomalies and
//! extreme-day flags.

use crate::climdex::ClimdexConfig;
use crate::error::ClimdexError;
use crate::types::frames::climatology_frame::ClimatologyLazyFrame;
use crate::types::frames::flagged_frame::FlaggedLazyFrame;
use crate::types::frames::series_frame::SeriesLazyFrame;
use crate::types::season::Season;
use polars::prelude::{col, lit, when, JoinArgs, JoinType};

/// Classifies the full series against a materialized climatology.
///
/// Every record is left-joined to its `doy` baseline row, then:
/// `anomaly_tmax = tmax - tmax_mean`, `anomaly_tmin = tmin - tmin_mean`,
/// `hot_extreme = tmax > tmax_p90`, `cold_extreme = tmin < tmin_p10`,
/// `summer_day = tmax > summer_day_threshold`. A record whose day-of-year
/// has no baseline row (day 366 when the reference window holds no leap
/// years) keeps null anomalies, and its flag comparisons — null against a
/// null threshold — are filled with `false`. The `season` column is also
/// attached here, with December counted into the DJF season of its own
/// calendar year.
pub fn flag_extremes(
    series: &SeriesLazyFrame,
    climatology: &ClimatologyLazyFrame,
    config: &ClimdexConfig,
) -> Result<FlaggedLazyFrame, ClimdexError> {
    let frame = series
        .frame
        .clone()
        .join(
            climatology.frame.clone(),
            [col("doy")],
            [col("doy")],
            JoinArgs::new(JoinType::Left),
        )
        .with_columns([
            (col("tmax") - col("tmax_mean")).alias("anomaly_tmax"),
            (col("tmin") - col("tmin_mean")).alias("anomaly_tmin"),
            col("tmax")
                .gt(col("tmax_p90"))
                .fill_null(lit(false))
                .alias("hot_extreme"),
            col("tmin")
                .lt(col("tmin_p10"))
                .fill_null(lit(false))
                .alias("cold_extreme"),
            col("tmax")
                .gt(lit(config.summer_day_threshold))
                .alias("summer_day"),
            when(col("month").eq(lit(12)).or(col("month").lt_eq(lit(2))))
                .then(lit(Season::Djf.abbrev()))
                .when(col("month").lt_eq(lit(5)))
                .then(lit(Season::Mam.abbrev()))
                .when(col("month").lt_eq(lit(8)))
                .then(lit(Season::Jja.abbrev()))
                .otherwise(lit(Season::Son.abbrev()))
                .alias("season"),
        ]);
    Ok(FlaggedLazyFrame::new(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climdex::Climdex;
    use crate::types::raw_row::RawDailyRow;
    use polars::prelude::DataFrame;

    fn engine() -> Climdex {
        Climdex::builder()
            .reference_start(1991)
            .reference_end(1994)
            .build()
    }

    /// Four reference years of Jan 1 (tmax 10/20/30/40, tmin 0/2/4/6) plus
    /// one later Jan 1 to classify.
    fn classified(probe_tmax: f64, probe_tmin: f64) -> DataFrame {
        let mut rows: Vec<RawDailyRow> = (0..4)
            .map(|i| {
                RawDailyRow::new(1991 + i, "01-01", 10.0 * (i + 1) as f64, 2.0 * i as f64)
            })
            .collect();
        rows.push(RawDailyRow::new(2005, "01-01", probe_tmax, probe_tmin));
        let engine = engine();
        let series = engine.normalize(&rows).unwrap();
        let climatology = engine.climatology(&series).unwrap();
        engine
            .classify(&series, &climatology)
            .unwrap()
            .for_year(crate::types::year::Year(2005))
            .collect()
            .unwrap()
    }

    fn f64_at(df: &DataFrame, name: &str) -> Option<f64> {
        df.column(name).unwrap().f64().unwrap().get(0)
    }

    fn flag_at(df: &DataFrame, name: &str) -> Option<bool> {
        df.column(name).unwrap().bool().unwrap().get(0)
    }

    #[test]
    fn anomalies_are_relative_to_the_bucket_mean() {
        // Jan 1 normals: tmax_mean 25, tmin_mean 3.
        let df = classified(30.0, 1.0);
        assert_eq!(f64_at(&df, "anomaly_tmax"), Some(5.0));
        assert_eq!(f64_at(&df, "anomaly_tmin"), Some(-2.0));
    }

    #[test]
    fn hot_flag_requires_exceeding_p90() {
        // Jan 1 tmax p90 = 37.0 under linear interpolation.
        let df = classified(37.0, 3.0);
        assert_eq!(flag_at(&df, "hot_extreme"), Some(false));
        let df = classified(37.1, 3.0);
        assert_eq!(flag_at(&df, "hot_extreme"), Some(true));
    }

    #[test]
    fn cold_flag_requires_undercutting_p10() {
        // Jan 1 tmin values 0/2/4/6 give p10 = 0.6.
        let df = classified(25.0, 0.6);
        assert_eq!(flag_at(&df, "cold_extreme"), Some(false));
        let df = classified(25.0, 0.5);
        assert_eq!(flag_at(&df, "cold_extreme"), Some(true));
    }

    #[test]
    fn summer_day_uses_fixed_threshold() {
        let df = classified(25.0, 3.0);
        assert_eq!(flag_at(&df, "summer_day"), Some(false));
        let df = classified(25.1, 3.0);
        assert_eq!(flag_at(&df, "summer_day"), Some(true));
    }

    #[test]
    fn missing_baseline_day_gets_false_flags_and_null_anomalies() {
        // Reference window 1991-1994 with data only on Dec 31 of common
        // years: doy 366 never enters the climatology, yet the 1996 leap
        // day record must classify without error.
        let rows = vec![
            RawDailyRow::new(1991, "12-31", 20.0, 10.0),
            RawDailyRow::new(1993, "12-31", 22.0, 12.0),
            RawDailyRow::new(1996, "12-31", 35.0, -5.0),
        ];
        let engine = engine();
        let series = engine.normalize(&rows).unwrap();
        let climatology = engine.climatology(&series).unwrap();
        let df = engine
            .classify(&series, &climatology)
            .unwrap()
            .for_year(crate::types::year::Year(1996))
            .collect()
            .unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(f64_at(&df, "anomaly_tmax"), None);
        assert_eq!(f64_at(&df, "anomaly_tmin"), None);
        assert_eq!(flag_at(&df, "hot_extreme"), Some(false));
        assert_eq!(flag_at(&df, "cold_extreme"), Some(false));
        // The fixed-threshold flag does not depend on the baseline.
        assert_eq!(flag_at(&df, "summer_day"), Some(true));
    }

    #[test]
    fn season_column_follows_the_month_mapping() {
        let rows = vec![
            RawDailyRow::new(2001, "01-15", 20.0, 10.0),
            RawDailyRow::new(2001, "04-15", 20.0, 10.0),
            RawDailyRow::new(2001, "07-15", 20.0, 10.0),
            RawDailyRow::new(2001, "10-15", 20.0, 10.0),
            RawDailyRow::new(2001, "12-15", 20.0, 10.0),
        ];
        let engine = engine();
        let series = engine.normalize(&rows).unwrap();
        let climatology = engine.climatology(&series).unwrap();
        let df = engine
            .classify(&series, &climatology)
            .unwrap()
            .collect()
            .unwrap();
        let season = df.column("season").unwrap().str().unwrap();
        assert_eq!(season.get(0), Some("DJF"));
        assert_eq!(season.get(1), Some("MAM"));
        assert_eq!(season.get(2), Some("JJA"));
        assert_eq!(season.get(3), Some("SON"));
        assert_eq!(season.get(4), Some("DJF"));
    }
}
