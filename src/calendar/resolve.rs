//! Reconstruction of concrete calendar dates from (year, month-day) pairs.

use crate::calendar::error::CalendarError;
use chrono::{Datelike, NaiveDate};

/// A month-day pair without a year, as parsed from the raw input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

/// Parses the month-day indicator of a raw row.
///
/// Accepted shapes: `MM-DD` / `M-D`, `MM/DD`, and a full `YYYY-MM-DD` date
/// whose embedded year is ignored (the year column is authoritative; the
/// upstream spreadsheet stores month-days as full dates with a placeholder
/// year).
pub fn parse_month_day(raw: &str) -> Result<MonthDay, CalendarError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(MonthDay {
            month: date.month(),
            day: date.day(),
        });
    }

    let separator = if trimmed.contains('/') { '/' } else { '-' };
    let mut parts = trimmed.split(separator);
    let month = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let day = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    match (month, day, parts.next()) {
        (Some(month), Some(day), None) => Ok(MonthDay { month, day }),
        _ => Err(CalendarError::UnparsableMonthDay(raw.to_string())),
    }
}

/// Reinterprets a month-day in the given year.
///
/// February 29 combined with a non-leap year truncates to February 28 of
/// that year; this is a lossy correction, not an error. Any other
/// combination that does not form a real date (April 31, month 13) is
/// rejected.
pub fn resolve_in_year(month_day: MonthDay, year: i32) -> Result<NaiveDate, CalendarError> {
    let MonthDay { month, day } = month_day;
    if month == 2 && day == 29 {
        if let Some(date) = NaiveDate::from_ymd_opt(year, 2, 29) {
            return Ok(date);
        }
        return NaiveDate::from_ymd_opt(year, 2, 28)
            .ok_or(CalendarError::ImpossibleDate { year, month, day });
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(CalendarError::ImpossibleDate { year, month, day })
}

/// Parses and resolves in one step: the per-record correction function
/// applied by the normalizer.
pub fn resolve_date(year: i32, raw_month_day: &str) -> Result<NaiveDate, CalendarError> {
    let month_day = parse_month_day(raw_month_day)?;
    resolve_in_year(month_day, year)
}
