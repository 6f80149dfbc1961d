use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DateChunked, IntoColumn, PolarsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Which extreme a wave event is a run of.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaveKind {
    Heat,
    Cold,
}

impl WaveKind {
    /// The label used in the event table.
    pub fn label(self) -> &'static str {
        match self {
            WaveKind::Heat => "Heat",
            WaveKind::Cold => "Cold",
        }
    }
}

impl Display for WaveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A maximal run of consecutive extreme days meeting the minimum-duration
/// policy.
///
/// `start` and `end` are the first and last date of the run (inclusive);
/// `duration_days` is the run length and is always at least the configured
/// minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveEvent {
    pub kind: WaveKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: u32,
}

/// Builds the event table (one row per wave) from a list of events.
pub fn events_frame(events: &[WaveEvent]) -> Result<DataFrame, PolarsError> {
    let kind = Column::new(
        "kind".into(),
        events.iter().map(|e| e.kind.label()).collect::<Vec<&str>>(),
    );
    let start = DateChunked::from_naive_date("start".into(), events.iter().map(|e| e.start))
        .into_column();
    let end =
        DateChunked::from_naive_date("end".into(), events.iter().map(|e| e.end)).into_column();
    let duration = Column::new(
        "duration_days".into(),
        events.iter().map(|e| e.duration_days).collect::<Vec<u32>>(),
    );
    DataFrame::new(vec![kind, start, end, duration])
}
