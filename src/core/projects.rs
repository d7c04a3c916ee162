use crate::core::calculator::timeline::build_gaps;
use crate::db::pool::DbPool;
use crate::db::queries::load_entries_since;
use crate::errors::AppResult;
use crate::models::entry::TimeLogEntry;
use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTime {
    pub project: String,
    pub entries: usize,
    pub time: Duration,
}

/// Counted time per project, largest first. Today's open segment runs until `now`.
pub fn summarize(entries: &[TimeLogEntry], now: NaiveDateTime) -> Vec<ProjectTime> {
    let mut by_project: HashMap<String, ProjectTime> = HashMap::new();

    for day in entries.chunk_by(|a, b| a.date() == b.date()) {
        let mut timeline = day.to_vec();
        if day.first().is_some_and(|e| e.date() == now.date()) {
            timeline.push(TimeLogEntry::now_marker(now));
        }

        for gap in build_gaps(&timeline).iter().take(day.len()) {
            let slot = by_project
                .entry(gap.entry.project.clone())
                .or_insert_with(|| ProjectTime {
                    project: gap.entry.project.clone(),
                    entries: 0,
                    time: Duration::zero(),
                });
            slot.entries += 1;
            if gap.entry.mode.is_counted()
                && let Some(d) = gap.duration
            {
                slot.time += d;
            }
        }
    }

    let mut out: Vec<ProjectTime> = by_project.into_values().collect();
    out.sort_by(|a, b| b.time.cmp(&a.time).then_with(|| a.project.cmp(&b.project)));
    out
}

pub struct ProjectsLogic;

impl ProjectsLogic {
    pub fn collect(pool: &DbPool, now: NaiveDateTime) -> AppResult<Vec<ProjectTime>> {
        let entries = load_entries_since(&pool.conn, None)?;
        Ok(summarize(&entries, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mode::TimeLogMode;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn breaks_do_not_count() {
        let entries = vec![
            TimeLogEntry::new(1, at(4, 8, 0), TimeLogMode::Normal, "a").with_project("api"),
            TimeLogEntry::new(2, at(4, 10, 0), TimeLogMode::Break, "pause").with_project("break"),
            TimeLogEntry::new(3, at(4, 10, 30), TimeLogMode::Normal, "b").with_project("web"),
            TimeLogEntry::new(4, at(4, 11, 0), TimeLogMode::Quit, "quit").with_project("quit"),
        ];
        let summary = summarize(&entries, at(9, 0, 0));

        assert_eq!(summary[0].project, "api");
        assert_eq!(summary[0].time, Duration::hours(2));
        let brk = summary.iter().find(|p| p.project == "break").unwrap();
        assert_eq!(brk.time, Duration::zero());
        assert_eq!(brk.entries, 1);
    }
}
