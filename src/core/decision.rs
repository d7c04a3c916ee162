//! Remembers after which entry a synthetic break was inserted for a day.

use crate::core::collaborators::DecisionStore;
use crate::errors::AppResult;
use crate::models::decision::InsertionDecision;
use chrono::NaiveDate;

/// Why a stored decision could not be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    Missing,
    IntervalMismatch { stored: usize },
    EntryCountChanged { stored: usize, current: usize },
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachedAnchor {
    Hit(usize),
    Miss(MissReason),
}

pub struct DecisionCache<'a, S: DecisionStore> {
    store: &'a S,
    key: &'a str,
}

impl<'a, S: DecisionStore> DecisionCache<'a, S> {
    pub fn new(store: &'a S, key: &'a str) -> Self {
        Self { store, key }
    }

    pub fn lookup(
        &self,
        date: NaiveDate,
        interval: usize,
        current_count: usize,
    ) -> AppResult<CachedAnchor> {
        let Some(d) = self.store.read_decision(date, self.key)? else {
            return Ok(CachedAnchor::Miss(MissReason::Missing));
        };

        let found = if d.interval_index != interval {
            CachedAnchor::Miss(MissReason::IntervalMismatch {
                stored: d.interval_index,
            })
        } else if d.total_entries != current_count {
            CachedAnchor::Miss(MissReason::EntryCountChanged {
                stored: d.total_entries,
                current: current_count,
            })
        } else if d.after_entry_index >= current_count {
            CachedAnchor::Miss(MissReason::OutOfRange {
                index: d.after_entry_index,
                len: current_count,
            })
        } else {
            CachedAnchor::Hit(d.after_entry_index)
        };

        Ok(found)
    }

    /// The stored anchor index, or `None` whenever [`Self::lookup`] misses.
    pub fn get(
        &self,
        date: NaiveDate,
        interval: usize,
        current_count: usize,
    ) -> AppResult<Option<usize>> {
        Ok(match self.lookup(date, interval, current_count)? {
            CachedAnchor::Hit(i) => Some(i),
            CachedAnchor::Miss(_) => None,
        })
    }

    pub fn put(
        &self,
        date: NaiveDate,
        interval: usize,
        current_count: usize,
        anchor: usize,
    ) -> AppResult<()> {
        self.store.write_decision(
            date,
            self.key,
            &InsertionDecision {
                interval_index: interval,
                total_entries: current_count,
                after_entry_index: anchor,
            },
        )
    }
}
