//! Runs the break check over a range of stored days.

use crate::core::collaborators::{ChoiceProvider, EntrySource, MutationSink};
use crate::core::compliance::{AnchorSource, BreakComplianceEngine, ComplianceOutcome, ComplianceReport};
use crate::db::pool::DbPool;
use crate::db::queries::load_days;
use crate::errors::AppResult;
use crate::utils::time::format_duration;
use chrono::NaiveDate;

pub struct BreaksLogic;

impl BreaksLogic {
    /// Check every stored day in `from..=to`. Adjusted days are written back
    /// when `apply` is set.
    pub fn run<P: ChoiceProvider>(
        pool: &mut DbPool,
        engine: &BreakComplianceEngine,
        bounds: Option<(NaiveDate, NaiveDate)>,
        chooser: &mut P,
        apply: bool,
    ) -> AppResult<Vec<ComplianceReport>> {
        let mut reports = Vec::new();

        for date in load_days(&pool.conn, bounds)? {
            let entries = pool.load_entries(date)?;
            if entries.is_empty() {
                continue;
            }

            let report = engine.apply(date, &entries, &*pool, chooser)?;
            if apply && report.is_adjusted() {
                pool.persist_adjusted_sequence(date, &report.entries)?;
            }
            reports.push(report);
        }

        Ok(reports)
    }

    pub fn describe(report: &ComplianceReport) -> String {
        match &report.outcome {
            ComplianceOutcome::NotOwed { elapsed } => format!(
                "{}: {} elapsed, no break required",
                report.date,
                format_duration(*elapsed)
            ),
            ComplianceOutcome::Satisfied { total_pause } => format!(
                "{}: {} of break recorded",
                report.date,
                format_duration(*total_pause)
            ),
            ComplianceOutcome::Inserted {
                anchor,
                remaining,
                source,
            } => {
                let how = match source {
                    AnchorSource::Cached => "stored choice",
                    AnchorSource::Chosen { .. } => "new choice",
                };
                let after = report
                    .entries
                    .get(*anchor)
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                format!(
                    "{}: {} of break added after '{}' ({})",
                    report.date,
                    format_duration(*remaining),
                    after,
                    how
                )
            }
            ComplianceOutcome::Cancelled { remaining } => format!(
                "{}: skipped, {} of break still missing",
                report.date,
                format_duration(*remaining)
            ),
        }
    }
}
