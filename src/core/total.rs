//! Month-by-month balance against the daily target.

use crate::core::calculator::worked::WorkedTimeAccumulator;
use crate::db::pool::DbPool;
use crate::db::queries::days_by_month;
use crate::errors::AppResult;
use crate::models::totals::TotalsReport;
use crate::utils::colors::paint_delta;
use crate::utils::time::format_duration_days;
use ansi_term::Colour;
use chrono::{Duration, NaiveDateTime, NaiveTime};

pub struct TotalLogic;

impl TotalLogic {
    pub fn report(
        pool: &DbPool,
        acc: &WorkedTimeAccumulator,
        now: NaiveDateTime,
    ) -> AppResult<TotalsReport> {
        let groups = days_by_month(&pool.conn)?;
        acc.summarize(pool, &groups, now)
    }

    /// Clock time at which a positive delta is worked off, counting from `now`.
    pub fn zero_at(delta: Duration, now: NaiveDateTime) -> Option<NaiveTime> {
        (delta > Duration::zero()).then(|| (now + delta).time())
    }

    /// One line per month plus the grand-total line.
    pub fn render(report: &TotalsReport, now: NaiveDateTime) -> Vec<String> {
        let mut lines = Vec::with_capacity(report.months.len() + 1);
        let mut running = Duration::zero();

        for month in &report.months {
            let individual = month.totals.delta;
            running += individual;

            let effect = if individual < Duration::zero() {
                format!("{} added to time delta.", delta_text(individual, false))
            } else if individual > Duration::zero() {
                format!("{} removed from time delta.", delta_text(individual, false))
            } else {
                format!(
                    "{} or in words nothing was changed.",
                    delta_text(individual, false)
                )
            };

            lines.push(format!(
                "[{:02}.{:04}] Of the mandatory time {} you have a time delta of {}. {}",
                month.month,
                month.year,
                Colour::Yellow.paint(format_duration_days(month.totals.reference)),
                delta_text(running, true),
                effect
            ));
        }

        let full = report.totals.delta;
        let mut last = format!(
            "Of the mandatory time {} you have a time delta of {} as of now.",
            Colour::Yellow.paint(format_duration_days(report.totals.reference)),
            delta_text(full, true)
        );
        if let Some(t) = Self::zero_at(full, now) {
            last.push_str(&format!(
                " The delta will amount to zero at {}.",
                Colour::Red.paint(t.format("%H:%M").to_string())
            ));
        } else if full == Duration::zero() {
            last.push_str(" No change to time balance is done if ending your day now.");
        }
        lines.push(last);

        lines
    }
}

/// A positive delta (time owed) is shown with a minus sign.
fn delta_text(delta: Duration, with_sign: bool) -> String {
    let sign = match (with_sign, delta > Duration::zero()) {
        (false, _) => "",
        (true, true) => "-",
        (true, false) => "+",
    };
    paint_delta(delta, &format!("{sign}{}", format_duration_days(delta)))
}
