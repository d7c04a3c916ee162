use crate::cli::commands::now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::collaborators::EntrySource;
use crate::core::list::{ListedEntry, day_tag, format_line, with_durations};
use crate::core::search::{SearchLogic, search_terms};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::since_from_days;

const DEFAULT_DAYS: i64 = 31;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { text, days } = cmd {
        let terms = search_terms(text);
        let since = since_from_days(days.as_deref(), DEFAULT_DAYS)?;

        let pool = DbPool::open(&cfg.database)?;
        let found = SearchLogic::find(&pool, since, &terms)?;
        if found.is_empty() {
            info(format!("No entries match '{}'", text.join(" ")));
            return Ok(());
        }

        // Durations come from the full day, not from the matches alone.
        let now = now();
        for day in found.chunk_by(|a, b| a.date() == b.date()) {
            let date = day[0].date();
            let full = pool.load_entries(date)?;
            let tag = day_tag(date);
            for item in with_durations(&full, now)
                .into_iter()
                .filter(|l: &ListedEntry| day.iter().any(|m| m.id == l.entry.id))
            {
                println!("{}", format_line(&tag, &item));
            }
        }
    }
    Ok(())
}
