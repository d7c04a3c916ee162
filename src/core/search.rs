use crate::db::pool::DbPool;
use crate::db::queries::load_entries_since;
use crate::errors::AppResult;
use crate::models::entry::TimeLogEntry;
use chrono::NaiveDate;

const SEPARATORS: [char; 5] = [' ', '[', ']', '|', ':'];

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEPARATORS).filter(|w| !w.is_empty())
}

/// Search words taken from the raw arguments.
pub fn search_terms(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|a| words(a))
        .map(str::to_lowercase)
        .collect()
}

/// True when a word of the project or message starts with any term.
pub fn matches(entry: &TimeLogEntry, terms: &[String]) -> bool {
    words(&entry.project)
        .chain(words(&entry.message))
        .map(str::to_lowercase)
        .any(|w| terms.iter().any(|t| w.starts_with(t.as_str())))
}

pub struct SearchLogic;

impl SearchLogic {
    pub fn find(
        pool: &DbPool,
        since: Option<NaiveDate>,
        terms: &[String],
    ) -> AppResult<Vec<TimeLogEntry>> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        Ok(load_entries_since(&pool.conn, since)?
            .into_iter()
            .filter(|e| matches(e, terms))
            .collect())
    }
}
