use crate::cli::commands::{now, parse_mode};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::{LogLogic, NewEntry};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::mode::TimeLogMode;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::time::parse_optional_time;

/// Handles `log`, `break` and `quit`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let entry = match cmd {
        Commands::Log {
            text,
            mode,
            at,
            date,
        } => NewEntry {
            text: Some(text.clone()),
            mode: mode.as_deref().map(parse_mode).transpose()?.unwrap_or_default(),
            date: date
                .as_deref()
                .map(|d| parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string())))
                .transpose()?,
            time: parse_optional_time(at.as_ref())?,
        },
        Commands::Break { text, at } => NewEntry {
            text: text.clone(),
            mode: TimeLogMode::Break,
            date: None,
            time: parse_optional_time(at.as_ref())?,
        },
        Commands::Quit { at } => NewEntry {
            text: None,
            mode: TimeLogMode::Quit,
            date: None,
            time: parse_optional_time(at.as_ref())?,
        },
        _ => return Ok(()),
    };

    let pool = DbPool::open(&cfg.database)?;
    let added = LogLogic::append(&pool, cfg, entry, now())?;
    success(format!("#{} {} {}", added.id, added.date(), added));
    Ok(())
}
