//! Run-length segmentation of extreme-day flag sequences into wave events.

use crate::error::ClimdexError;
use crate::types::frames::extract::date_from_days;
use crate::waves::event::{WaveEvent, WaveKind};
use log::info;
use polars::prelude::DataFrame;

/// Returns the maximal runs of consecutive `true` values with length at
/// least `min_len`, as inclusive `(start, end)` index pairs in sequence
/// order.
///
/// A single `false` breaks a run; runs are never merged across a gap. Runs
/// shorter than `min_len` are discarded silently — that is policy, not
/// failure. A run touching either end of the sequence is evaluated exactly
/// like an interior run.
pub fn find_runs(flags: &[bool], min_len: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut current_start: Option<usize> = None;
    for (idx, &flag) in flags.iter().enumerate() {
        match (flag, current_start) {
            (true, None) => current_start = Some(idx),
            (true, Some(_)) => {}
            (false, Some(start)) => {
                if idx - start >= min_len {
                    runs.push((start, idx - 1));
                }
                current_start = None;
            }
            (false, None) => {}
        }
    }
    if let Some(start) = current_start {
        if flags.len() - start >= min_len {
            runs.push((start, flags.len() - 1));
        }
    }
    runs
}

/// Marks every position belonging to a qualifying run: the day-membership
/// mask behind the `warm_spell` / `cold_spell` columns.
pub fn spell_mask(flags: &[bool], min_len: usize) -> Vec<bool> {
    let mut mask = vec![false; flags.len()];
    for (start, end) in find_runs(flags, min_len) {
        for slot in &mut mask[start..=end] {
            *slot = true;
        }
    }
    mask
}

/// Segments one flag column of a collected flagged series into wave events.
///
/// The frame must carry a `date` column and the named boolean column, and
/// be sorted ascending by date; events come out in series order. The
/// segmenter is flag-agnostic — it is called once per flag column, and the
/// Heat and Cold streams stay independent.
pub fn events_for_flag(
    df: &DataFrame,
    flag_column: &str,
    kind: WaveKind,
    min_len: usize,
) -> Result<Vec<WaveEvent>, ClimdexError> {
    let date = df
        .column("date")
        .and_then(|c| c.date())
        .map_err(|e| ClimdexError::ColumnNotFound("date".to_string(), e))?;
    let flags = df
        .column(flag_column)
        .and_then(|c| c.bool())
        .map_err(|e| ClimdexError::ColumnNotFound(flag_column.to_string(), e))?;
    let flags: Vec<bool> = flags.into_iter().map(|f| f.unwrap_or(false)).collect();

    let mut events = Vec::new();
    for (start, end) in find_runs(&flags, min_len) {
        let (Some(start_days), Some(end_days)) = (date.get(start), date.get(end)) else {
            continue;
        };
        events.push(WaveEvent {
            kind,
            start: date_from_days(start_days),
            end: date_from_days(end_days),
            duration_days: (end - start + 1) as u32,
        });
    }
    info!(
        "Found {} {} wave(s) of at least {} day(s) in column '{}'",
        events.len(),
        kind,
        min_len,
        flag_column
    );
    Ok(events)
}
