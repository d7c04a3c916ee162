//! Seams between the accounting engine and the outside world.
//!
//! Storage implements these on top of SQLite (`db::store`), the console
//! implements [`ChoiceProvider`] (`cli::prompt`), and tests use in-memory fakes.

use crate::errors::AppResult;
use crate::models::decision::InsertionDecision;
use crate::models::entry::TimeLogEntry;
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub trait EntrySource {
    /// Entries of `date`, ordered by timestamp.
    fn load_entries(&self, date: NaiveDate) -> AppResult<Vec<TimeLogEntry>>;

    /// Like [`EntrySource::load_entries`], but when `date` is the day of
    /// `now` a marker entry at `now` is appended so that the open-ended
    /// present counts as well.
    fn load_entries_until(
        &self,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<Vec<TimeLogEntry>> {
        let mut entries = self.load_entries(date)?;
        if date == now.date() {
            entries.push(TimeLogEntry::now_marker(now));
        }
        Ok(entries)
    }
}

pub trait DecisionStore {
    fn read_decision(&self, date: NaiveDate, key: &str) -> AppResult<Option<InsertionDecision>>;
    fn write_decision(
        &self,
        date: NaiveDate,
        key: &str,
        decision: &InsertionDecision,
    ) -> AppResult<()>;
}

/// Context shown to whoever picks the anchor entry.
#[derive(Debug, Clone, Copy)]
pub struct AnchorRequest {
    pub date: NaiveDate,
    pub total_pause: Duration,
    pub required: Duration,
    pub remaining: Duration,
}

/// One selectable entry. `inside_window` is a hint only.
#[derive(Debug, Clone)]
pub struct AnchorCandidate<'a> {
    pub entry: &'a TimeLogEntry,
    pub gap_end: Option<NaiveDateTime>,
    pub inside_window: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorChoice {
    Selected(usize),
    Cancelled,
}

pub trait ChoiceProvider {
    fn choose_anchor(
        &mut self,
        request: &AnchorRequest,
        candidates: &[AnchorCandidate<'_>],
    ) -> AppResult<AnchorChoice>;
}

pub trait MutationSink {
    fn persist_adjusted_sequence(
        &mut self,
        date: NaiveDate,
        entries: &[TimeLogEntry],
    ) -> AppResult<()>;
}
