use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Meteorological season of a record, keyed by calendar month.
///
/// December of year Y is assigned to the DJF season of year Y itself, not to
/// the winter spanning into year Y+1. This splits meteorological winters
/// across calendar-year boundaries; it is the convention of the seasonal
/// summary table and is kept deliberately.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// December, January, February.
    Djf,
    /// March, April, May.
    Mam,
    /// June, July, August.
    Jja,
    /// September, October, November.
    Son,
}

impl Season {
    /// Maps a calendar month (1-12) to its season. Returns `None` for
    /// anything outside 1-12.
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Djf),
            3..=5 => Some(Season::Mam),
            6..=8 => Some(Season::Jja),
            9..=11 => Some(Season::Son),
            _ => None,
        }
    }

    /// The conventional three-letter label, as used in the seasonal table.
    pub fn abbrev(self) -> &'static str {
        match self {
            Season::Djf => "DJF",
            Season::Mam => "MAM",
            Season::Jja => "JJA",
            Season::Son => "SON",
        }
    }

    pub fn from_abbrev(s: &str) -> Option<Season> {
        match s {
            "DJF" => Some(Season::Djf),
            "MAM" => Some(Season::Mam),
            "JJA" => Some(Season::Jja),
            "SON" => Some(Season::Son),
            _ => None,
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}
