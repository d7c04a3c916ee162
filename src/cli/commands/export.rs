use crate::cli::parser::Commands;
use crate::cli::prompt::ConsoleChoiceProvider;
use crate::config::Config;
use crate::core::calculator::policy::BreakPolicy;
use crate::core::compliance::BreakComplianceEngine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportOptions;
use crate::utils::date::parse_range;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        all,
        force,
    } = cmd
    {
        let bounds = match range.as_deref() {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let pool = DbPool::open(&cfg.database)?;
        let engine = BreakComplianceEngine::new(BreakPolicy::from_config(cfg)?);
        let mut chooser = ConsoleChoiceProvider::stdio();

        let opts = ExportOptions {
            format: *format,
            file: file.as_str(),
            bounds,
            all_modes: *all,
            force: *force,
        };
        ExportLogic::export(&pool, &engine, &opts, &mut chooser)?;
    }
    Ok(())
}
