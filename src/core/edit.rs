use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entry, update_entry};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeLogEntry;
use crate::models::mode::TimeLogMode;
use chrono::NaiveTime;

/// Requested changes; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub message: Option<String>,
    pub project: Option<String>,
    pub mode: Option<TimeLogMode>,
    pub time: Option<NaiveTime>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.project.is_none() && self.mode.is_none() && self.time.is_none()
    }

    fn apply_to(&self, entry: &TimeLogEntry) -> TimeLogEntry {
        let mut out = entry.clone();
        if let Some(m) = &self.message {
            out.message = m.clone();
        }
        if let Some(p) = &self.project {
            out.project = p.clone();
        }
        if let Some(mode) = self.mode {
            out.mode = mode;
        }
        if let Some(t) = self.time {
            out.timestamp = entry.date().and_time(t);
        }
        out
    }
}

pub struct EditLogic;

impl EditLogic {
    /// Returns the entry before and after the change.
    pub fn apply(
        pool: &DbPool,
        id: i64,
        changes: &EntryChanges,
    ) -> AppResult<(TimeLogEntry, TimeLogEntry)> {
        let before = load_entry(&pool.conn, id)?.ok_or(AppError::EntryNotFound(id))?;
        let after = changes.apply_to(&before);

        if after != before {
            update_entry(&pool.conn, &after)?;
            audit(
                &pool.conn,
                "edit",
                &format!("#{id}"),
                &format!("{before} -> {after}"),
            );
        }

        Ok((before, after))
    }
}
