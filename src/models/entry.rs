use super::mode::TimeLogMode;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single activity entry. It opens a segment that lasts until the next
/// entry of the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLogEntry {
    pub id: i64,                  // ⇔ entries.id (0 for entries not stored yet)
    pub timestamp: NaiveDateTime, // ⇔ entries.timestamp ("YYYY-MM-DD HH:MM:SS")
    pub mode: TimeLogMode,        // ⇔ entries.mode
    pub project: String,          // ⇔ entries.project
    pub location: String,         // ⇔ entries.location
    pub message: String,          // ⇔ entries.message
    /// Set on breaks inserted by the compliance engine; never stored.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl TimeLogEntry {
    pub fn new(id: i64, timestamp: NaiveDateTime, mode: TimeLogMode, message: &str) -> Self {
        Self {
            id,
            timestamp,
            mode,
            project: String::new(),
            location: String::new(),
            message: message.to_string(),
            synthetic: false,
        }
    }

    pub fn with_project(mut self, project: &str) -> Self {
        self.project = project.to_string();
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Placeholder for the open-ended present of today.
    pub fn now_marker(now: NaiveDateTime) -> Self {
        Self::new(0, now, TimeLogMode::Normal, "")
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Timestamp truncated to the whole minute.
    pub fn rounded_timestamp(&self) -> NaiveDateTime {
        round_to_minute(self.timestamp)
    }

    /// A break built from this entry's fields, placed at `at`.
    pub fn synthetic_break(&self, at: NaiveDateTime) -> Self {
        Self {
            timestamp: at,
            mode: TimeLogMode::Break,
            message: String::new(),
            synthetic: true,
            ..self.clone()
        }
    }

    /// Same entry, moved forward by `by`.
    pub fn shifted(&self, by: Duration) -> Self {
        Self {
            timestamp: self.timestamp + by,
            ..self.clone()
        }
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn label(&self) -> String {
        if self.project.is_empty() {
            self.message.clone()
        } else if self.message.is_empty() {
            self.project.clone()
        } else {
            format!("{}: {}", self.project, self.message)
        }
    }
}

impl fmt::Display for TimeLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.time_str(), self.mode, self.label())
    }
}

pub fn round_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
