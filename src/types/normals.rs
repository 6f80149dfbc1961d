use serde::{Deserialize, Serialize};

/// One collected climatology row: the reference-window statistics for a
/// single day-of-year bucket.
///
/// `None` means the statistic is undefined for that bucket (for example the
/// sample standard deviation of a single-observation bucket). Undefined
/// values are propagated, never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfYearNormals {
    pub doy: u32,
    pub tmax_mean: Option<f64>,
    pub tmax_std: Option<f64>,
    pub tmax_p10: Option<f64>,
    pub tmax_p90: Option<f64>,
    pub tmin_mean: Option<f64>,
    pub tmin_std: Option<f64>,
    pub tmin_p10: Option<f64>,
    pub tmin_p90: Option<f64>,
    pub tmed_mean: Option<f64>,
    pub tmed_std: Option<f64>,
}
