use crate::errors::{AppError, AppResult};
use crate::models::day::MonthGroup;
use crate::models::decision::InsertionDecision;
use crate::models::entry::TimeLogEntry;
use crate::models::mode::TimeLogMode;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

const ENTRY_COLUMNS: &str =
    "e.id, e.timestamp, e.mode, e.project, e.location, e.message";

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

pub fn map_row(row: &Row) -> Result<TimeLogEntry> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TS_FORMAT)
        .map_err(|_| conversion_error(AppError::InvalidTime(ts_str.clone())))?;

    let mode_str: String = row.get("mode")?;
    let mode = TimeLogMode::from_db_str(&mode_str)
        .ok_or_else(|| conversion_error(AppError::InvalidMode(mode_str.clone())))?;

    Ok(TimeLogEntry {
        id: row.get("id")?,
        timestamp,
        mode,
        project: row.get("project")?,
        location: row.get("location")?,
        message: row.get("message")?,
        synthetic: false,
    })
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Id of the day row for `date`, created if needed.
pub fn ensure_day(conn: &Connection, date: NaiveDate) -> AppResult<i64> {
    let date_str = date.format(DATE_FORMAT).to_string();
    conn.execute("INSERT OR IGNORE INTO days (date) VALUES (?1)", [&date_str])?;
    let id = conn.query_row("SELECT id FROM days WHERE date = ?1", [&date_str], |r| {
        r.get(0)
    })?;
    Ok(id)
}

pub fn insert_entry(conn: &Connection, entry: &TimeLogEntry) -> AppResult<i64> {
    let day_id = ensure_day(conn, entry.date())?;
    conn.execute(
        "INSERT INTO entries (day_id, timestamp, mode, project, location, message, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            day_id,
            entry.timestamp.format(TS_FORMAT).to_string(),
            entry.mode.to_db_str(),
            entry.project,
            entry.location,
            entry.message,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an entry (all fields except id). The entry may move to another day.
pub fn update_entry(conn: &Connection, entry: &TimeLogEntry) -> AppResult<()> {
    let day_id = ensure_day(conn, entry.date())?;
    let changed = conn.execute(
        "UPDATE entries
         SET day_id = ?1, timestamp = ?2, mode = ?3,
             project = ?4, location = ?5, message = ?6
         WHERE id = ?7",
        params![
            day_id,
            entry.timestamp.format(TS_FORMAT).to_string(),
            entry.mode.to_db_str(),
            entry.project,
            entry.location,
            entry.message,
            entry.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EntryNotFound(entry.id));
    }
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeLogEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries e WHERE e.id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

/// Entries of one day, by time; equal timestamps keep insertion order.
pub fn load_entries_by_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<TimeLogEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS}
         FROM entries e JOIN days d ON d.id = e.day_id
         WHERE d.date = ?1
         ORDER BY e.timestamp ASC, e.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([date.format(DATE_FORMAT).to_string()], map_row)?;
    Ok(collect(rows)?)
}

pub fn last_entry_of_date(conn: &Connection, date: NaiveDate) -> AppResult<Option<TimeLogEntry>> {
    Ok(load_entries_by_date(conn, date)?.pop())
}

/// Dates that have a day row, optionally bounded (inclusive).
pub fn load_days(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<NaiveDate>> {
    let (from, to) = match bounds {
        Some((f, t)) => (
            f.format(DATE_FORMAT).to_string(),
            t.format(DATE_FORMAT).to_string(),
        ),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT date FROM days WHERE date BETWEEN ?1 AND ?2 ORDER BY date ASC",
    )?;
    let rows = stmt.query_map([from, to], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        let s = r?;
        let d = NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|_| AppError::InvalidDate(s))?;
        out.push(d);
    }
    Ok(out)
}

pub fn days_by_month(conn: &Connection) -> AppResult<Vec<MonthGroup>> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for date in load_days(conn, None)? {
        match groups.last_mut() {
            Some(g) if g.year == date.year() && g.month == date.month() => g.days.push(date),
            _ => groups.push(MonthGroup {
                year: date.year(),
                month: date.month(),
                days: vec![date],
            }),
        }
    }

    Ok(groups)
}

/// Entries from `since` onwards (all when `None`), oldest first.
pub fn load_entries_since(
    conn: &Connection,
    since: Option<NaiveDate>,
) -> AppResult<Vec<TimeLogEntry>> {
    let from = since
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "0000-01-01".to_string());
    let sql = format!(
        "SELECT {ENTRY_COLUMNS}
         FROM entries e JOIN days d ON d.id = e.day_id
         WHERE d.date >= ?1
         ORDER BY e.timestamp ASC, e.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([from], map_row)?;
    Ok(collect(rows)?)
}

pub fn read_decision(
    conn: &Connection,
    date: NaiveDate,
    realm: &str,
) -> AppResult<Option<InsertionDecision>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT json FROM decisions WHERE day = ?1 AND realm = ?2",
            params![date.format(DATE_FORMAT).to_string(), realm],
            |row| row.get(0),
        )
        .optional()?;

    // Unreadable payloads are treated like a missing decision.
    Ok(json.and_then(|j| serde_json::from_str(&j).ok()))
}

pub fn write_decision(
    conn: &Connection,
    date: NaiveDate,
    realm: &str,
    decision: &InsertionDecision,
) -> AppResult<()> {
    let json = serde_json::to_string(decision)?;
    conn.execute(
        "INSERT INTO decisions (day, realm, json) VALUES (?1, ?2, ?3)
         ON CONFLICT(day, realm) DO UPDATE SET json = excluded.json",
        params![date.format(DATE_FORMAT).to_string(), realm, json],
    )?;
    Ok(())
}
