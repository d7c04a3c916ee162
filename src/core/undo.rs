use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_entry, last_entry_of_date};
use crate::errors::AppResult;
use crate::models::entry::TimeLogEntry;
use chrono::NaiveDate;

pub struct UndoLogic;

impl UndoLogic {
    /// Remove the latest entry of `date`. `None` when the day is already empty.
    pub fn apply(pool: &DbPool, date: NaiveDate) -> AppResult<Option<TimeLogEntry>> {
        let Some(last) = last_entry_of_date(&pool.conn, date)? else {
            return Ok(None);
        };

        delete_entry(&pool.conn, last.id)?;
        audit(&pool.conn, "undo", &format!("#{}", last.id), &last.to_string());
        Ok(Some(last))
    }
}
