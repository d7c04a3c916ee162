//! Appending entries to the log.

use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_entry, load_entries_by_date};
use crate::errors::AppResult;
use crate::models::entry::TimeLogEntry;
use crate::models::mode::TimeLogMode;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Split `project:message`. Text without a usable project prefix is all message.
pub fn split_project(text: &str) -> (Option<String>, String) {
    if let Some((project, message)) = text.split_once(':') {
        let project = project.trim();
        if !project.is_empty() && !project.contains(char::is_whitespace) {
            return (Some(project.to_string()), message.trim().to_string());
        }
    }
    (None, text.trim().to_string())
}

/// Fields of a new entry before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub text: Option<String>,
    pub mode: TimeLogMode,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

pub struct LogLogic;

impl LogLogic {
    /// Project/message for `entry`, filling the gaps the way the mode implies.
    ///
    /// `previous` is the latest entry of the day before the new one.
    pub fn resolve_labels(
        entry: &NewEntry,
        previous: Option<&TimeLogEntry>,
        cfg: &Config,
    ) -> (String, String) {
        let (project, message) = match entry.text.as_deref() {
            Some(t) => split_project(t),
            None => (None, String::new()),
        };

        match entry.mode {
            TimeLogMode::Break => (
                project.unwrap_or_else(|| "break".to_string()),
                if message.is_empty() { "pause".to_string() } else { message },
            ),
            TimeLogMode::Quit => (
                project.unwrap_or_else(|| "quit".to_string()),
                if message.is_empty() { "quit".to_string() } else { message },
            ),
            _ => {
                let project = project.unwrap_or_else(|| {
                    previous
                        .filter(|p| matches!(p.mode, TimeLogMode::Normal | TimeLogMode::Export))
                        .map(|p| p.project.clone())
                        .filter(|p| !p.is_empty())
                        .unwrap_or_else(|| cfg.default_project.clone())
                });
                (project, message)
            }
        }
    }

    pub fn append(
        pool: &DbPool,
        cfg: &Config,
        entry: NewEntry,
        now: NaiveDateTime,
    ) -> AppResult<TimeLogEntry> {
        let date = entry.date.unwrap_or(now.date());
        let time = entry
            .time
            .unwrap_or_else(|| now.time().with_nanosecond(0).unwrap_or(now.time()));
        let timestamp = date.and_time(time);

        let day = load_entries_by_date(&pool.conn, date)?;
        let previous = day.iter().rev().find(|e| e.timestamp <= timestamp);

        let (project, message) = Self::resolve_labels(&entry, previous, cfg);

        let mut new = TimeLogEntry::new(0, timestamp, entry.mode, &message)
            .with_project(&project)
            .with_location(&cfg.default_location);
        new.id = insert_entry(&pool.conn, &new)?;

        audit(
            &pool.conn,
            &entry.mode.to_string(),
            &new.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            &new.label(),
        );

        Ok(new)
    }
}
