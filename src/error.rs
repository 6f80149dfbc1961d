use crate::calendar::error::CalendarError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type of the engine.
///
/// Per-record and per-bucket problems (unresolvable dates, thin reference
/// buckets) are handled by dropping or null-propagation and never surface
/// here; this enum covers mechanical failures only.
#[derive(Debug, Error)]
pub enum ClimdexError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing output file '{0}'")]
    OutputIo(PathBuf, #[source] std::io::Error),
}
