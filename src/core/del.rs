use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_entry, load_entry};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeLogEntry;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn find(pool: &DbPool, id: i64) -> AppResult<TimeLogEntry> {
        load_entry(&pool.conn, id)?.ok_or(AppError::EntryNotFound(id))
    }

    pub fn apply(pool: &DbPool, id: i64) -> AppResult<TimeLogEntry> {
        let entry = Self::find(pool, id)?;
        delete_entry(&pool.conn, id)?;
        audit(
            &pool.conn,
            "del",
            &format!("#{id}"),
            &format!("{} {}", entry.date(), entry),
        );
        Ok(entry)
    }
}
