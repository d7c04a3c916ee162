use super::entry::TimeLogEntry;
use chrono::NaiveDate;
use serde::Serialize;

/// All entries logged on one calendar date, ordered by timestamp.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    pub entries: Vec<TimeLogEntry>,
}

impl Day {
    pub fn new(date: NaiveDate, entries: Vec<TimeLogEntry>) -> Self {
        Self { date, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Days that have at least one stored record, grouped by calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub days: Vec<NaiveDate>,
}

impl MonthGroup {
    pub fn label(&self) -> String {
        format!("{:02}.{:04}", self.month, self.year)
    }
}
