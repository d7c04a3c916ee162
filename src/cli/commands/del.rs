use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let entry = DeleteLogic::find(&pool, *id)?;

        let prompt = format!(
            "Delete entry #{} ({} {})? This action is irreversible.",
            id,
            entry.date(),
            entry
        );
        if !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        DeleteLogic::apply(&pool, *id)?;
        success(format!("Entry #{} has been deleted.", id));
    }
    Ok(())
}
