use crate::core::collaborators::{ChoiceProvider, EntrySource};
use crate::core::compliance::BreakComplianceEngine;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::load_days;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_absolute, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EntryExport, day_rows};
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportOptions<'a> {
    pub format: ExportFormat,
    pub file: &'a str,
    pub bounds: Option<(NaiveDate, NaiveDate)>,
    pub all_modes: bool,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Break-adjusted rows of every stored day within `bounds`.
    ///
    /// Adjustments are computed for the export only; stored entries are
    /// left untouched.
    pub fn collect<P: ChoiceProvider>(
        pool: &DbPool,
        engine: &BreakComplianceEngine,
        bounds: Option<(NaiveDate, NaiveDate)>,
        chooser: &mut P,
        all_modes: bool,
    ) -> AppResult<Vec<EntryExport>> {
        let mut rows = Vec::new();
        for date in load_days(&pool.conn, bounds)? {
            let entries = pool.load_entries(date)?;
            if entries.is_empty() {
                continue;
            }
            let report = engine.apply(date, &entries, pool, chooser)?;
            rows.extend(day_rows(&report.entries, all_modes));
        }
        Ok(rows)
    }

    pub fn export<P: ChoiceProvider>(
        pool: &DbPool,
        engine: &BreakComplianceEngine,
        opts: &ExportOptions<'_>,
        chooser: &mut P,
    ) -> AppResult<()> {
        let path = Path::new(opts.file);
        ensure_absolute(path)?;
        ensure_writable(path, opts.force)?;

        let rows = Self::collect(pool, engine, opts.bounds, chooser, opts.all_modes)?;
        if rows.is_empty() {
            warning("No entries found for selected range.");
            return Ok(());
        }

        match opts.format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit(
            &pool.conn,
            "export",
            opts.format.as_str(),
            &format!("{} rows to {}", rows.len(), path.display()),
        );
        Ok(())
    }
}
