use crate::errors::AppResult;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Days, entries and the decision store.
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS days (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            date  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            day_id      INTEGER NOT NULL REFERENCES days(id) ON DELETE CASCADE,
            timestamp   TEXT NOT NULL,
            mode        TEXT NOT NULL DEFAULT 'normal'
                        CHECK(mode IN ('normal','break','quit','export','offtime')),
            project     TEXT NOT NULL DEFAULT '',
            message     TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_day_time ON entries(day_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_entries_message ON entries(message);

        CREATE TABLE IF NOT EXISTS decisions (
            day    TEXT NOT NULL,
            realm  TEXT NOT NULL,
            json   TEXT NOT NULL,
            PRIMARY KEY (day, realm)
        );
        "#,
    )
}

/// Entries created before locations were tracked get the empty location.
fn migrate_add_location_column(conn: &Connection, announce: bool) -> Result<()> {
    let version = "20240912_0002_add_entry_location";

    if is_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "entries", "location")? {
        conn.execute(
            "ALTER TABLE entries ADD COLUMN location TEXT NOT NULL DEFAULT ''",
            [],
        )?;
        if announce {
            success(format!(
                "Migration applied: {} → added 'location' to entries table",
                version
            ));
        }
    }

    mark_applied(conn, version, "Added location column to entries")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Safe to call on every start: each step checks its own state first.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "entries")?;
    create_core_tables(conn)?;
    if fresh {
        mark_applied(conn, "20240907_0001_initial", "Created days, entries and decisions")?;
    }

    migrate_add_location_column(conn, !fresh)?;
    Ok(())
}
