use crate::cli::commands::parse_mode;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::{EditLogic, EntryChanges};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::parse_optional_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        message,
        project,
        mode,
        time,
    } = cmd
    {
        let changes = EntryChanges {
            message: message.clone(),
            project: project.clone(),
            mode: mode.as_deref().map(parse_mode).transpose()?,
            time: parse_optional_time(time.as_ref())?,
        };

        if changes.is_empty() {
            info("Nothing to change: use --message, --project, --mode or --time.");
            return Ok(());
        }

        let pool = DbPool::open(&cfg.database)?;
        let (before, after) = EditLogic::apply(&pool, *id, &changes)?;
        if before == after {
            info(format!("Entry #{} already matches the requested values.", id));
        } else {
            success(format!("#{}: {} → {}", id, before, after));
        }
    }
    Ok(())
}
