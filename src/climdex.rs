//! The main entry point of the engine: configure once, then run the staged
//! pipeline over a raw daily record.

use crate::calendar::normalize::normalize_series;
use crate::classify::flag_extremes;
use crate::climatology::builder::build_climatology;
use crate::error::ClimdexError;
use crate::indices::annual::{annual_indices, percentage_indices};
use crate::indices::seasonal::seasonal_summary;
use crate::types::frames::climatology_frame::ClimatologyLazyFrame;
use crate::types::frames::flagged_frame::FlaggedLazyFrame;
use crate::types::frames::series_frame::SeriesLazyFrame;
use crate::types::raw_row::RawDailyRow;
use crate::types::year::Year;
use crate::waves::event::{events_frame, WaveEvent, WaveKind};
use crate::waves::segmenter::{events_for_flag, spell_mask};
use bon::bon;
use log::info;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};

const DEFAULT_REFERENCE_START: i32 = 1991;
const DEFAULT_REFERENCE_END: i32 = 2020;
const DEFAULT_MIN_WAVE_DAYS: usize = 3;
const DEFAULT_HOT_PERCENTILE: f64 = 0.90;
const DEFAULT_COLD_PERCENTILE: f64 = 0.10;
const DEFAULT_SUMMER_DAY_THRESHOLD: f64 = 25.0;
const DEFAULT_FROST_THRESHOLD: f64 = 0.0;
const DEFAULT_TROPICAL_NIGHT_THRESHOLD: f64 = 20.0;
const DEFAULT_ICING_THRESHOLD: f64 = 0.0;

/// The tunable parameters of the engine.
///
/// Everything the pipeline treats as a constant lives here rather than as a
/// global, so one process can analyze several stations under different
/// conventions. `Default` matches the WMO-style setup: reference window
/// 1991-2020, waves of at least 3 days, p90/p10 extreme thresholds, and
/// 25/0/20/0 °C for the summer-day, frost, tropical-night and icing counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimdexConfig {
    /// First year of the reference window (inclusive).
    pub reference_start: Year,
    /// Last year of the reference window (inclusive).
    pub reference_end: Year,
    /// Minimum number of consecutive extreme days that constitutes a wave.
    pub min_wave_days: usize,
    /// Percentile level for the hot-extreme threshold (0..1).
    pub hot_percentile: f64,
    /// Percentile level for the cold-extreme threshold (0..1).
    pub cold_percentile: f64,
    /// A day is a summer day when tmax exceeds this (°C).
    pub summer_day_threshold: f64,
    /// A day is a frost day when tmin falls below this (°C).
    pub frost_threshold: f64,
    /// A night is tropical when tmin exceeds this (°C).
    pub tropical_night_threshold: f64,
    /// A day is an icing day when tmax stays below this (°C).
    pub icing_threshold: f64,
}

impl Default for ClimdexConfig {
    fn default() -> Self {
        Self {
            reference_start: Year(DEFAULT_REFERENCE_START),
            reference_end: Year(DEFAULT_REFERENCE_END),
            min_wave_days: DEFAULT_MIN_WAVE_DAYS,
            hot_percentile: DEFAULT_HOT_PERCENTILE,
            cold_percentile: DEFAULT_COLD_PERCENTILE,
            summer_day_threshold: DEFAULT_SUMMER_DAY_THRESHOLD,
            frost_threshold: DEFAULT_FROST_THRESHOLD,
            tropical_night_threshold: DEFAULT_TROPICAL_NIGHT_THRESHOLD,
            icing_threshold: DEFAULT_ICING_THRESHOLD,
        }
    }
}

/// The six output artifacts of one pipeline run.
///
/// All frames are produced once and never updated; `events` is the typed
/// form of the event table ([`ClimdexReport::events_frame`] builds the
/// tabular one).
#[derive(Debug, Clone)]
pub struct ClimdexReport {
    /// Full tidy series: raw variables, baseline join, anomalies, flags,
    /// season and wave-membership columns.
    pub series: DataFrame,
    /// One row per day-of-year with mean/std/percentile columns.
    pub climatology: DataFrame,
    /// TX90p/TN10p percentage indices per year.
    pub percentage_indices: DataFrame,
    /// Per (year, season) extreme-day counts and mean anomalies.
    pub seasonal_summary: DataFrame,
    /// Annual ETCCDI-style index table.
    pub annual_indices: DataFrame,
    /// Heat waves followed by cold waves, each stream ascending by start.
    pub events: Vec<WaveEvent>,
}

impl ClimdexReport {
    /// Builds the event table, one row per wave.
    pub fn events_frame(&self) -> Result<DataFrame, ClimdexError> {
        Ok(events_frame(&self.events)?)
    }
}

/// The engine for computing extreme indices and wave events from a daily
/// temperature record.
///
/// Create one with [`Climdex::builder`] (all parameters optional) or
/// [`Climdex::with_config`], then either call [`Climdex::run`] for the
/// whole pipeline or drive the stages individually. The computation is
/// strictly two-phase: the climatology is fully materialized from the
/// reference window before any record is classified against it.
///
/// # Example
///
/// ```
/// use climdex::{Climdex, RawDailyRow};
///
/// let mut rows = Vec::new();
/// for year in 1991..=1995 {
///     for day in 1..=9 {
///         let tmax = if year == 1995 { 33.0 } else { 26.0 + (day % 3) as f64 };
///         rows.push(RawDailyRow::new(year, format!("02-0{day}"), tmax, 18.0));
///     }
/// }
///
/// let engine = Climdex::builder()
///     .reference_start(1991)
///     .reference_end(1994)
///     .min_wave_days(3)
///     .build();
/// let report = engine.run(&rows)?;
///
/// assert_eq!(report.climatology.height(), 9);
/// assert!(!report.events.is_empty());
/// # Ok::<(), climdex::ClimdexError>(())
/// ```
pub struct Climdex {
    config: ClimdexConfig,
}

#[bon]
impl Climdex {
    /// Creates an engine, defaulting every omitted parameter: reference
    /// window 1991-2020, 3-day minimum wave duration, 0.90/0.10 percentile
    /// levels, 25 °C summer days, 0 °C frost days, 20 °C tropical nights,
    /// 0 °C icing days.
    #[builder]
    pub fn new(
        reference_start: Option<i32>,
        reference_end: Option<i32>,
        min_wave_days: Option<usize>,
        hot_percentile: Option<f64>,
        cold_percentile: Option<f64>,
        summer_day_threshold: Option<f64>,
        frost_threshold: Option<f64>,
        tropical_night_threshold: Option<f64>,
        icing_threshold: Option<f64>,
    ) -> Self {
        Self {
            config: ClimdexConfig {
                reference_start: Year(reference_start.unwrap_or(DEFAULT_REFERENCE_START)),
                reference_end: Year(reference_end.unwrap_or(DEFAULT_REFERENCE_END)),
                min_wave_days: min_wave_days.unwrap_or(DEFAULT_MIN_WAVE_DAYS),
                hot_percentile: hot_percentile.unwrap_or(DEFAULT_HOT_PERCENTILE),
                cold_percentile: cold_percentile.unwrap_or(DEFAULT_COLD_PERCENTILE),
                summer_day_threshold: summer_day_threshold
                    .unwrap_or(DEFAULT_SUMMER_DAY_THRESHOLD),
                frost_threshold: frost_threshold.unwrap_or(DEFAULT_FROST_THRESHOLD),
                tropical_night_threshold: tropical_night_threshold
                    .unwrap_or(DEFAULT_TROPICAL_NIGHT_THRESHOLD),
                icing_threshold: icing_threshold.unwrap_or(DEFAULT_ICING_THRESHOLD),
            },
        }
    }

    /// Creates an engine from an explicit configuration.
    pub fn with_config(config: ClimdexConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ClimdexConfig {
        &self.config
    }

    /// Normalizes raw rows into the canonical daily series: dates resolved
    /// against the year column, unresolvable records dropped, duplicates
    /// collapsed to the first occurrence, rows sorted ascending, and
    /// `tmed`/`year`/`month`/`doy` derived.
    pub fn normalize(&self, rows: &[RawDailyRow]) -> Result<SeriesLazyFrame, ClimdexError> {
        normalize_series(rows)
    }

    /// Builds and materializes the day-of-year climatology from the
    /// reference-window subset of the series. Phase one of the pipeline;
    /// the table is immutable afterwards.
    pub fn climatology(
        &self,
        series: &SeriesLazyFrame,
    ) -> Result<ClimatologyLazyFrame, ClimdexError> {
        build_climatology(series, &self.config)
    }

    /// Classifies the full series against a materialized climatology,
    /// deriving anomalies, extreme flags and the season column. Phase two;
    /// requires the complete climatology, not a partial one.
    pub fn classify(
        &self,
        series: &SeriesLazyFrame,
        climatology: &ClimatologyLazyFrame,
    ) -> Result<FlaggedLazyFrame, ClimdexError> {
        flag_extremes(series, climatology, &self.config)
    }

    /// Extracts heat and cold wave events from the flagged series: maximal
    /// runs of the respective extreme flag with length at least the
    /// configured minimum. The two streams are independent and returned
    /// concatenated, heat first, each ascending by start date.
    pub fn wave_events(&self, flagged: &FlaggedLazyFrame) -> Result<Vec<WaveEvent>, ClimdexError> {
        let df = flagged.collect()?;
        let mut events = events_for_flag(&df, "hot_extreme", WaveKind::Heat, self.config.min_wave_days)?;
        events.extend(events_for_flag(
            &df,
            "cold_extreme",
            WaveKind::Cold,
            self.config.min_wave_days,
        )?);
        Ok(events)
    }

    /// Computes the annual ETCCDI-style index table from the flagged
    /// series.
    pub fn annual_indices(&self, flagged: &FlaggedLazyFrame) -> Result<DataFrame, ClimdexError> {
        annual_indices(flagged, &self.config)
    }

    /// Computes the annual TX90p/TN10p percentage-index table from the
    /// flagged series.
    pub fn percentage_indices(
        &self,
        flagged: &FlaggedLazyFrame,
    ) -> Result<DataFrame, ClimdexError> {
        percentage_indices(flagged)
    }

    /// Computes the per (year, season) summary table from the flagged
    /// series.
    pub fn seasonal_summary(&self, flagged: &FlaggedLazyFrame) -> Result<DataFrame, ClimdexError> {
        seasonal_summary(flagged)
    }

    /// Runs the whole pipeline: normalize, build the climatology, classify
    /// every record against it, segment waves, and aggregate the annual and
    /// seasonal tables. The tidy series in the report additionally carries
    /// `warm_spell` / `cold_spell` columns marking days inside a qualifying
    /// wave.
    pub fn run(&self, rows: &[RawDailyRow]) -> Result<ClimdexReport, ClimdexError> {
        let series = self.normalize(rows)?;
        let climatology = self.climatology(&series)?;
        let flagged = self.classify(&series, &climatology)?;

        let mut tidy = flagged.collect()?;
        info!(
            "Classified {} day(s) against a {}-bucket climatology",
            tidy.height(),
            climatology.collect()?.height()
        );

        let min_len = self.config.min_wave_days;
        let heat = events_for_flag(&tidy, "hot_extreme", WaveKind::Heat, min_len)?;
        let cold = events_for_flag(&tidy, "cold_extreme", WaveKind::Cold, min_len)?;

        let flag_values = |df: &DataFrame, name: &str| -> Result<Vec<bool>, ClimdexError> {
            let flags = df
                .column(name)
                .and_then(|c| c.bool())
                .map_err(|e| ClimdexError::ColumnNotFound(name.to_string(), e))?;
            Ok(flags.into_iter().map(|f| f.unwrap_or(false)).collect())
        };
        let warm = spell_mask(&flag_values(&tidy, "hot_extreme")?, min_len);
        let cold_mask = spell_mask(&flag_values(&tidy, "cold_extreme")?, min_len);
        tidy.with_column(Column::new("warm_spell".into(), warm))?;
        tidy.with_column(Column::new("cold_spell".into(), cold_mask))?;

        let mut events = heat;
        events.extend(cold);

        Ok(ClimdexReport {
            series: tidy,
            climatology: climatology.collect()?,
            percentage_indices: self.percentage_indices(&flagged)?,
            seasonal_summary: self.seasonal_summary(&flagged)?,
            annual_indices: self.annual_indices(&flagged)?,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// A multi-year synthetic record with a deliberate heat wave in 2002
    /// and a cold snap in 2003, over a flat reference climate.
    fn synthetic_rows() -> Vec<RawDailyRow> {
        let mut rows = Vec::new();
        for year in 1991..=2003 {
            for day in 1..=20 {
                let mut tmax = 27.0 + (day % 4) as f64;
                let mut tmin = 17.0 + (day % 3) as f64;
                if year == 2002 && (6..=10).contains(&day) {
                    tmax += 12.0;
                }
                if year == 2003 && (3..=5).contains(&day) {
                    tmin -= 12.0;
                }
                rows.push(RawDailyRow::new(year, format!("01-{:02}", day), tmax, tmin));
            }
        }
        rows
    }

    fn engine() -> Climdex {
        Climdex::builder()
            .reference_start(1991)
            .reference_end(2000)
            .build()
    }

    #[test]
    fn builder_defaults_match_config_default() {
        let engine = Climdex::builder().build();
        assert_eq!(engine.config(), &ClimdexConfig::default());
    }

    #[test]
    fn with_config_round_trips() {
        let config = ClimdexConfig {
            min_wave_days: 5,
            ..ClimdexConfig::default()
        };
        let engine = Climdex::with_config(config.clone());
        assert_eq!(engine.config(), &config);
    }

    #[test]
    fn run_produces_all_artifacts() {
        let report = engine().run(&synthetic_rows()).unwrap();
        assert_eq!(report.series.height(), 13 * 20);
        assert_eq!(report.climatology.height(), 20);
        assert_eq!(report.percentage_indices.height(), 13);
        assert_eq!(report.annual_indices.height(), 13);
        // All 13 years have only January records, so one DJF row each.
        assert_eq!(report.seasonal_summary.height(), 13);
        assert_eq!(report.events_frame().unwrap().height(), report.events.len());
    }

    #[test]
    fn run_detects_the_planted_waves() {
        let report = engine().run(&synthetic_rows()).unwrap();
        let heat: Vec<&WaveEvent> = report
            .events
            .iter()
            .filter(|e| e.kind == WaveKind::Heat)
            .collect();
        let cold: Vec<&WaveEvent> = report
            .events
            .iter()
            .filter(|e| e.kind == WaveKind::Cold)
            .collect();
        assert_eq!(heat.len(), 1);
        assert_eq!(cold.len(), 1);
        assert_eq!(heat[0].start, NaiveDate::from_ymd_opt(2002, 1, 6).unwrap());
        assert_eq!(heat[0].end, NaiveDate::from_ymd_opt(2002, 1, 10).unwrap());
        assert_eq!(heat[0].duration_days, 5);
        assert_eq!(cold[0].start, NaiveDate::from_ymd_opt(2003, 1, 3).unwrap());
        assert_eq!(cold[0].duration_days, 3);
    }

    #[test]
    fn heat_events_precede_cold_events_in_the_report() {
        let report = engine().run(&synthetic_rows()).unwrap();
        let first_cold = report
            .events
            .iter()
            .position(|e| e.kind == WaveKind::Cold)
            .unwrap();
        assert!(report.events[..first_cold]
            .iter()
            .all(|e| e.kind == WaveKind::Heat));
    }

    #[test]
    fn spell_columns_cover_exactly_the_event_days() {
        let report = engine().run(&synthetic_rows()).unwrap();
        let warm = report.series.column("warm_spell").unwrap().bool().unwrap();
        let warm_days: usize = warm.into_iter().flatten().filter(|&b| b).count();
        let heat_total: u32 = report
            .events
            .iter()
            .filter(|e| e.kind == WaveKind::Heat)
            .map(|e| e.duration_days)
            .sum();
        assert_eq!(warm_days as u32, heat_total);
    }

    #[test]
    fn wave_events_stage_matches_run() {
        let engine = engine();
        let rows = synthetic_rows();
        let series = engine.normalize(&rows).unwrap();
        let climatology = engine.climatology(&series).unwrap();
        let flagged = engine.classify(&series, &climatology).unwrap();
        let staged = engine.wave_events(&flagged).unwrap();
        let report = engine.run(&rows).unwrap();
        assert_eq!(staged, report.events);
    }

    #[test]
    fn longer_minimum_drops_short_waves() {
        let engine = Climdex::builder()
            .reference_start(1991)
            .reference_end(2000)
            .min_wave_days(4)
            .build();
        let report = engine.run(&synthetic_rows()).unwrap();
        // The 3-day cold snap no longer qualifies; the 5-day heat wave does.
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].kind, WaveKind::Heat);
    }
}
