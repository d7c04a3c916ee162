//! Day listings, shared by `list` and `search`.

use crate::core::calculator::timeline::build_gaps;
use crate::core::calculator::worked::WorkedTimeAccumulator;
use crate::core::collaborators::EntrySource;
use crate::db::pool::DbPool;
use crate::db::queries::load_days;
use crate::errors::AppResult;
use crate::models::day::Day;
use crate::models::entry::TimeLogEntry;
use crate::utils::colors::{GREY, RESET, YELLOW};
use crate::utils::formatting::{pad_right, print_separator};
use crate::utils::time::format_duration;
use chrono::{NaiveDate, NaiveDateTime};

/// One printable line: the entry and how long its segment lasted.
#[derive(Debug, Clone)]
pub struct ListedEntry {
    pub entry: TimeLogEntry,
    pub duration: Option<chrono::Duration>,
}

/// Segment durations for a day. Today's last entry runs until `now`.
pub fn with_durations(entries: &[TimeLogEntry], now: NaiveDateTime) -> Vec<ListedEntry> {
    let mut timeline = entries.to_vec();
    let open = timeline.first().is_some_and(|e| e.date() == now.date());
    if open {
        timeline.push(TimeLogEntry::now_marker(now));
    }

    build_gaps(&timeline)
        .into_iter()
        .take(entries.len())
        .map(|g| ListedEntry {
            entry: g.entry.clone(),
            duration: g.duration,
        })
        .collect()
}

pub fn format_line(tag: &str, item: &ListedEntry) -> String {
    let e = &item.entry;
    let duration = item
        .duration
        .map(format_duration)
        .unwrap_or_else(|| "--:--".to_string());
    let line = format!(
        "[{}] #{:<4} {}  {}  {}{}",
        tag,
        e.id,
        e.time_str(),
        duration,
        pad_right(&format!("[{}]", e.mode), 10),
        e.label()
    );

    if e.mode.is_counted() {
        line
    } else {
        format!("{GREY}{line}{RESET}")
    }
}

pub fn day_tag(date: NaiveDate) -> String {
    date.format("%a %d.%m").to_string()
}

pub struct ListLogic;

impl ListLogic {
    pub fn load(pool: &DbPool, bounds: Option<(NaiveDate, NaiveDate)>) -> AppResult<Vec<Day>> {
        let mut days = Vec::new();
        for date in load_days(&pool.conn, bounds)? {
            let entries = pool.load_entries(date)?;
            if !entries.is_empty() {
                days.push(Day::new(date, entries));
            }
        }
        Ok(days)
    }

    pub fn print(days: &[Day], acc: &WorkedTimeAccumulator, now: NaiveDateTime, separator: &str) {
        for (i, day) in days.iter().enumerate() {
            if i > 0 {
                print_separator(separator, 60);
            }
            let tag = day_tag(day.date);
            for item in with_durations(&day.entries, now) {
                println!("{}", format_line(&tag, &item));
            }

            let mut timeline = day.entries.clone();
            if day.date == now.date() {
                timeline.push(TimeLogEntry::now_marker(now));
            }
            let totals = acc.day_totals(&timeline);
            println!(
                "{}[{}] worked {} of {}{}",
                YELLOW,
                tag,
                format_duration(totals.actual),
                format_duration(totals.reference),
                RESET
            );
        }
    }
}
