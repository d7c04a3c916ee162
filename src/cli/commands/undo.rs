use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::undo::UndoLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Undo = cmd {
        let pool = DbPool::open(&cfg.database)?;
        match UndoLogic::apply(&pool, today())? {
            Some(e) => success(format!("Removed {}", e)),
            None => info("All entries of today have been removed"),
        }
    }
    Ok(())
}
