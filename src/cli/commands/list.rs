use crate::cli::commands::now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::policy::WorkPolicy;
use crate::core::calculator::worked::WorkedTimeAccumulator;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::{self, parse_range};
use chrono::NaiveDate;

/// Default listing: today and yesterday.
const DEFAULT_DAYS: i64 = 2;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, days } = cmd {
        let bounds = resolve_bounds(period.as_deref(), days.as_deref())?;

        let pool = DbPool::open(&cfg.database)?;
        let found = ListLogic::load(&pool, bounds)?;
        if found.is_empty() {
            info("No entries in the selected period");
            return Ok(());
        }

        let acc = WorkedTimeAccumulator::new(WorkPolicy::from_config(cfg)?);
        ListLogic::print(&found, &acc, now(), &cfg.separator_char);
    }
    Ok(())
}

/// `None` means every stored day.
fn resolve_bounds(
    period: Option<&str>,
    days: Option<&str>,
) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period {
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => parse_range(p).map(Some),
        None => {
            let today = date::today();
            Ok(date::since_from_days(days, DEFAULT_DAYS)?.map(|since| (since, today)))
        }
    }
}
