//! Turns an ordered list of entries into (entry, gap-to-next) pairs.

use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeLogEntry;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// An entry together with the time until the next entry.
/// The last entry of a day has no following gap.
#[derive(Debug, Clone, Copy)]
pub struct Gap<'a> {
    pub index: usize,
    pub entry: &'a TimeLogEntry,
    pub duration: Option<Duration>,
}

impl Gap<'_> {
    /// Point in time where this gap ends (the next entry's timestamp).
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.duration.map(|d| self.entry.timestamp + d)
    }

    pub fn is_pause(&self) -> bool {
        self.entry.mode.contributes_pause_if_preceding()
    }
}

pub fn build_gaps(entries: &[TimeLogEntry]) -> Vec<Gap<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Gap {
            index,
            entry,
            duration: entries
                .get(index + 1)
                .map(|next| next.timestamp - entry.timestamp),
        })
        .collect()
}

/// Same as [`build_gaps`], for callers that cannot work on an empty day.
pub fn build_gaps_non_empty(entries: &[TimeLogEntry]) -> AppResult<Vec<Gap<'_>>> {
    if entries.is_empty() {
        return Err(AppError::EmptySequence);
    }
    Ok(build_gaps(entries))
}

/// Entries must be non-decreasing in time; ties are fine.
pub fn ensure_ordered(date: NaiveDate, entries: &[TimeLogEntry]) -> AppResult<()> {
    match entries
        .windows(2)
        .position(|w| w[1].timestamp < w[0].timestamp)
    {
        Some(i) => Err(AppError::InvalidSequenceOrder { date, index: i + 1 }),
        None => Ok(()),
    }
}

/// Time between the first and the last entry.
pub fn elapsed(entries: &[TimeLogEntry]) -> Duration {
    match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => Duration::zero(),
    }
}

/// Sum of all gaps that follow a pause entry.
pub fn total_pause(gaps: &[Gap<'_>]) -> Duration {
    gaps.iter()
        .filter(|g| g.is_pause())
        .filter_map(|g| g.duration)
        .fold(Duration::zero(), |acc, d| acc + d)
}
