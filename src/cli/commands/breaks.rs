use crate::cli::parser::Commands;
use crate::cli::prompt::ConsoleChoiceProvider;
use crate::config::Config;
use crate::core::breaks::BreaksLogic;
use crate::core::calculator::policy::BreakPolicy;
use crate::core::compliance::BreakComplianceEngine;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};
use crate::utils::date::{current_month_bounds, parse_range};
use crate::utils::formatting::wrap_with_indent;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Breaks { range, apply } = cmd {
        let bounds = match range.as_deref() {
            None => Some(current_month_bounds()),
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        header(match bounds {
            Some((from, to)) => format!("Break check {} → {}", from, to),
            None => "Break check, all days".to_string(),
        });

        let mut pool = DbPool::open(&cfg.database)?;
        let engine = BreakComplianceEngine::new(BreakPolicy::from_config(cfg)?);
        let mut chooser = ConsoleChoiceProvider::stdio();

        let reports = BreaksLogic::run(&mut pool, &engine, bounds, &mut chooser, *apply)?;
        if reports.is_empty() {
            info("No entries in the selected range.");
            return Ok(());
        }

        for report in &reports {
            println!("{}", wrap_with_indent(&BreaksLogic::describe(report), 100, 4));
        }

        let adjusted = reports.iter().filter(|r| r.is_adjusted()).count();
        if adjusted > 0 {
            if *apply {
                success(format!("{adjusted} day(s) updated."));
            } else {
                info(format!(
                    "{adjusted} day(s) would change; run with --apply to store the breaks."
                ));
            }
        }
    }
    Ok(())
}
