pub mod audit;
pub mod breaks;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod projects;
pub mod search;
pub mod total;
pub mod undo;

use crate::errors::{AppError, AppResult};
use crate::models::mode::TimeLogMode;
use chrono::{Local, NaiveDateTime};

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn parse_mode(s: &str) -> AppResult<TimeLogMode> {
    TimeLogMode::from_code(s).ok_or_else(|| AppError::InvalidMode(s.to_string()))
}
