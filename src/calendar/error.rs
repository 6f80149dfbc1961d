use thiserror::Error;

/// Errors raised while reconstructing a calendar date from a (year,
/// month-day) pair.
///
/// These are per-record conditions: the normalizer drops the offending
/// record, logs it, and continues. They are never fatal to a batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Could not parse month-day value '{0}'")]
    UnparsableMonthDay(String),

    #[error("No such calendar date: year {year}, month {month}, day {day}")]
    ImpossibleDate { year: i32, month: u32, day: u32 },
}
