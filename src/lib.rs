mod calendar;
mod classify;
mod climatology;
mod climdex;
mod error;
mod export;
mod indices;
mod types;
mod waves;

pub use climdex::*;
pub use error::ClimdexError;

pub use calendar::error::CalendarError;
pub use calendar::resolve::{parse_month_day, resolve_date, resolve_in_year, MonthDay};

pub use types::flagged_day::FlaggedDay;
pub use types::normals::DayOfYearNormals;
pub use types::raw_row::RawDailyRow;
pub use types::season::Season;
pub use types::year::Year;

pub use types::frames::climatology_frame::ClimatologyLazyFrame;
pub use types::frames::flagged_frame::FlaggedLazyFrame;
pub use types::frames::series_frame::SeriesLazyFrame;

pub use waves::event::{events_frame, WaveEvent, WaveKind};
pub use waves::segmenter::{find_runs, spell_mask};
