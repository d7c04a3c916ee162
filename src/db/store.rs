//! SQLite-backed implementations of the engine collaborators.

use crate::core::collaborators::{DecisionStore, EntrySource, MutationSink};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::decision::InsertionDecision;
use crate::models::entry::TimeLogEntry;
use chrono::NaiveDate;

impl EntrySource for DbPool {
    fn load_entries(&self, date: NaiveDate) -> AppResult<Vec<TimeLogEntry>> {
        queries::load_entries_by_date(&self.conn, date)
    }
}

impl DecisionStore for DbPool {
    fn read_decision(&self, date: NaiveDate, key: &str) -> AppResult<Option<InsertionDecision>> {
        queries::read_decision(&self.conn, date, key)
    }

    fn write_decision(
        &self,
        date: NaiveDate,
        key: &str,
        decision: &InsertionDecision,
    ) -> AppResult<()> {
        queries::write_decision(&self.conn, date, key, decision)?;
        audit(
            &self.conn,
            "decision",
            &date.to_string(),
            &format!("Break after entry {} of {}", decision.after_entry_index + 1, decision.total_entries),
        );
        Ok(())
    }
}

impl MutationSink for DbPool {
    /// Store an adjusted day in one transaction: synthetic breaks become
    /// real entries, stored entries get their (possibly shifted) times.
    fn persist_adjusted_sequence(
        &mut self,
        date: NaiveDate,
        entries: &[TimeLogEntry],
    ) -> AppResult<()> {
        let tx = self.conn.transaction()?;

        let mut inserted = 0;
        let mut moved = 0;
        for entry in entries {
            if entry.synthetic {
                let mut stored = entry.clone();
                stored.synthetic = false;
                queries::insert_entry(&tx, &stored)?;
                inserted += 1;
            } else if entry.id > 0 {
                if let Some(before) = queries::load_entry(&tx, entry.id)?
                    && before.timestamp != entry.timestamp
                {
                    moved += 1;
                }
                queries::update_entry(&tx, entry)?;
            }
        }

        audit(
            &tx,
            "breaks",
            &date.to_string(),
            &format!("Inserted {inserted} break(s), moved {moved} entries"),
        );

        tx.commit()?;
        Ok(())
    }
}
