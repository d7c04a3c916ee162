use crate::cli::commands::now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::policy::WorkPolicy;
use crate::core::calculator::worked::WorkedTimeAccumulator;
use crate::core::total::TotalLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Total = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let acc = WorkedTimeAccumulator::new(WorkPolicy::from_config(cfg)?);

        let now = now();
        let report = TotalLogic::report(&pool, &acc, now)?;
        for line in TotalLogic::render(&report, now) {
            println!("{line}");
        }
    }
    Ok(())
}
