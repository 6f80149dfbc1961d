use crate::types::season::Season;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One collected row of the flagged series: a normalized daily record joined
/// to its day-of-year baseline, with anomalies and extreme-day flags.
///
/// Anomalies are `None` when the record's day-of-year has no climatology row
/// (day 366 can be absent when the reference window contains no leap years);
/// the flags are `false` in that case rather than undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedDay {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub season: Season,
    pub doy: u32,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub tmed: Option<f64>,
    pub anomaly_tmax: Option<f64>,
    pub anomaly_tmin: Option<f64>,
    pub hot_extreme: bool,
    pub cold_extreme: bool,
    pub summer_day: bool,
}
