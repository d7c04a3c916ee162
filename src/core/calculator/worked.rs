//! Worked time per day against the daily target, aggregated per month.

use crate::core::calculator::policy::WorkPolicy;
use crate::core::collaborators::EntrySource;
use crate::errors::AppResult;
use crate::models::day::MonthGroup;
use crate::models::entry::TimeLogEntry;
use crate::models::totals::{DayTotals, MonthTotals, TotalsReport, WorkTotals};
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub struct WorkedTimeAccumulator {
    policy: WorkPolicy,
}

impl WorkedTimeAccumulator {
    pub fn new(policy: WorkPolicy) -> Self {
        Self { policy }
    }

    /// Worked time of one day's entries.
    ///
    /// The segment after a break entry is skipped, everything else counts.
    /// A day without any entry counts as a full target day.
    pub fn day_totals(&self, entries: &[TimeLogEntry]) -> WorkTotals {
        let reference = self.policy.daily_target;

        let Some(first) = entries.first() else {
            return WorkTotals::new(reference, reference);
        };

        let mut actual = Duration::zero();
        let mut last = first.rounded_timestamp();
        let mut was_pause = false;

        for q in entries {
            let ts = q.rounded_timestamp();
            if was_pause {
                was_pause = false;
            } else {
                actual += ts - last;
                if !q.mode.is_counted() {
                    was_pause = true;
                }
            }
            last = ts;
        }

        WorkTotals::new(reference, actual)
    }

    pub fn day<S: EntrySource>(
        &self,
        source: &S,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<DayTotals> {
        let entries = source.load_entries_until(date, now)?;
        Ok(DayTotals {
            date,
            totals: self.day_totals(&entries),
        })
    }

    pub fn month<S: EntrySource>(
        &self,
        source: &S,
        group: &MonthGroup,
        now: NaiveDateTime,
    ) -> AppResult<MonthTotals> {
        let mut dates = group.days.clone();
        dates.sort();

        let mut days = Vec::with_capacity(dates.len());
        let mut totals = WorkTotals::default();
        for date in dates {
            let day = self.day(source, date, now)?;
            totals += day.totals;
            days.push(day);
        }

        Ok(MonthTotals {
            year: group.year,
            month: group.month,
            days,
            totals,
        })
    }

    /// Per-month totals in chronological order plus the grand total.
    pub fn summarize<S: EntrySource>(
        &self,
        source: &S,
        groups: &[MonthGroup],
        now: NaiveDateTime,
    ) -> AppResult<TotalsReport> {
        let mut ordered: Vec<&MonthGroup> = groups.iter().collect();
        ordered.sort_by_key(|g| (g.year, g.month));

        let mut report = TotalsReport::default();
        for group in ordered {
            let month = self.month(source, group, now)?;
            report.totals += month.totals;
            report.months.push(month);
        }
        Ok(report)
    }
}
