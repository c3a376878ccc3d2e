//! Schema creation and validation for the SQLite store.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Version stamped into `PRAGMA user_version` by `initialize`.
pub const SCHEMA_VERSION: i32 = 1;

const TABLES: [&str; 3] = ["projects", "records", "log"];

/// Full schema. `begin`/`end` are quoted since both are SQL keywords.
pub const SCHEMA_SQL: &str = r#"
    CREATE TABLE projects (
        name          TEXT NOT NULL PRIMARY KEY,
        creation_time TEXT NOT NULL
    );

    CREATE TABLE records (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        project       TEXT NOT NULL REFERENCES projects(name),
        creation_time TEXT NOT NULL,
        "begin"       TEXT NOT NULL,
        "end"         TEXT,
        CHECK ("end" IS NULL OR "end" >= "begin")
    );

    -- at most one open record per store
    CREATE UNIQUE INDEX idx_records_single_open ON records(("end" IS NULL)) WHERE "end" IS NULL;
    CREATE INDEX idx_records_begin ON records("begin");
    CREATE INDEX idx_records_project ON records(project, "begin");

    CREATE TABLE log (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        date      TEXT NOT NULL,
        operation TEXT NOT NULL,
        target    TEXT DEFAULT '',
        message   TEXT NOT NULL
    );

    PRAGMA user_version = 1;
"#;

pub fn user_version(conn: &Connection) -> rusqlite::Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// True when the file already carries a schema version or any of our tables.
pub fn is_initialized(conn: &Connection) -> AppResult<bool> {
    if user_version(conn)? != 0 {
        return Ok(true);
    }
    for table in TABLES {
        if table_exists(conn, table)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Fail with `AppError::Schema` unless the store is initialized with a known layout.
pub fn check(conn: &Connection) -> AppResult<()> {
    match user_version(conn)? {
        0 => {
            return Err(AppError::Schema(
                "store is not initialized, run `tire init` first".into(),
            ));
        }
        SCHEMA_VERSION => {}
        other => {
            return Err(AppError::Schema(format!(
                "unsupported schema version {} (expected {})",
                other, SCHEMA_VERSION
            )));
        }
    }

    for table in TABLES {
        if !table_exists(conn, table)? {
            return Err(AppError::Schema(format!("missing table '{}'", table)));
        }
    }
    Ok(())
}
