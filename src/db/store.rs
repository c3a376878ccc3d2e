//! Durable storage of projects and records.
//!
//! `Store` is the seam between the session tracker / reporting logic and the
//! persistence layer. `SqliteStore` is the only implementation; it owns its
//! connection and is handed to the core by reference.

use crate::db::queries::{RECORD_COLUMNS, map_project, map_record, ts_to_sql};
use crate::db::schema;
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::record::{Record, RecordId};
use chrono::NaiveDateTime;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, TransactionBehavior, params};
use std::path::Path;
use std::time::Duration;

/// How long a second process waits for the writer lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub trait Store {
    /// Create the schema. Fails with `AppError::Schema` if it already exists.
    fn initialize(&self) -> AppResult<()>;

    /// Fail with `AppError::Schema` unless the store is initialized.
    fn check_schema(&self) -> AppResult<()>;

    fn add_project(&self, name: &str, now: NaiveDateTime) -> AppResult<()>;

    fn get_project(&self, name: &str) -> AppResult<Option<Project>>;

    fn list_projects(&self) -> AppResult<Vec<String>>;

    /// Insert a new open record. The project is not validated here.
    fn add_record(
        &self,
        project: &str,
        begin: NaiveDateTime,
        now: NaiveDateTime,
    ) -> AppResult<RecordId>;

    /// Set `end` on the open record `id`.
    fn close_open_record(&self, id: RecordId, end: NaiveDateTime) -> AppResult<()>;

    fn find_open_record(&self) -> AppResult<Option<Record>>;

    /// All records (or one project's), ordered by `begin`.
    fn list_records(&self, project: Option<&str>) -> AppResult<Vec<Record>>;

    /// Records intersecting `[start, end)`. Open records are unbounded.
    fn list_records_overlapping(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Record>>;

    /// Run `f` as one all-or-nothing unit holding the writer lock.
    fn atomically<T, F>(&self, f: F) -> AppResult<T>
    where
        Self: Sized,
        F: FnOnce(&Self) -> AppResult<T>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        Self::configure(Connection::open(path)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> AppResult<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    /// Raw connection, used by the audit log.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn query_records(&self, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_record)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

impl Store for SqliteStore {
    fn initialize(&self) -> AppResult<()> {
        if schema::is_initialized(&self.conn)? {
            return Err(AppError::Schema("store is already initialized".into()));
        }

        self.atomically(|store| {
            store.conn.execute_batch(schema::SCHEMA_SQL)?;
            Ok(())
        })
    }

    fn check_schema(&self) -> AppResult<()> {
        schema::check(&self.conn)
    }

    fn add_project(&self, name: &str, now: NaiveDateTime) -> AppResult<()> {
        match self.conn.execute(
            "INSERT INTO projects (name, creation_time) VALUES (?1, ?2)",
            params![name, ts_to_sql(&now)],
        ) {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => {
                Err(AppError::DuplicateProject(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get_project(&self, name: &str) -> AppResult<Option<Project>> {
        let project = self
            .conn
            .query_row(
                "SELECT name, creation_time FROM projects WHERE name = ?1",
                [name],
                map_project,
            )
            .optional()?;
        Ok(project)
    }

    fn list_projects(&self) -> AppResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM projects ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn add_record(
        &self,
        project: &str,
        begin: NaiveDateTime,
        now: NaiveDateTime,
    ) -> AppResult<RecordId> {
        self.conn.execute(
            r#"INSERT INTO records (project, creation_time, "begin") VALUES (?1, ?2, ?3)"#,
            params![project, ts_to_sql(&now), ts_to_sql(&begin)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn close_open_record(&self, id: RecordId, end: NaiveDateTime) -> AppResult<()> {
        let changed = self.conn.execute(
            r#"UPDATE records SET "end" = ?1 WHERE id = ?2 AND "end" IS NULL"#,
            params![ts_to_sql(&end), id],
        )?;

        if changed == 0 {
            return Err(AppError::NoOpenSession);
        }
        Ok(())
    }

    fn find_open_record(&self) -> AppResult<Option<Record>> {
        let sql = format!(r#"SELECT {} FROM records WHERE "end" IS NULL"#, RECORD_COLUMNS);
        let record = self.conn.query_row(&sql, [], map_record).optional()?;
        Ok(record)
    }

    fn list_records(&self, project: Option<&str>) -> AppResult<Vec<Record>> {
        match project {
            Some(name) => {
                let sql = format!(
                    r#"SELECT {} FROM records WHERE project = ?1 ORDER BY "begin" ASC, id ASC"#,
                    RECORD_COLUMNS
                );
                self.query_records(&sql, [name])
            }
            None => {
                let sql = format!(
                    r#"SELECT {} FROM records ORDER BY "begin" ASC, id ASC"#,
                    RECORD_COLUMNS
                );
                self.query_records(&sql, [])
            }
        }
    }

    fn list_records_overlapping(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<Record>> {
        let sql = format!(
            r#"SELECT {} FROM records
               WHERE "begin" < ?2 AND ("end" IS NULL OR "end" > ?1)
               ORDER BY "begin" ASC, id ASC"#,
            RECORD_COLUMNS
        );
        self.query_records(&sql, params![ts_to_sql(&start), ts_to_sql(&end)])
    }

    fn atomically<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Self) -> AppResult<T>,
    {
        // Dropping `tx` on the error path rolls back.
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let out = f(self)?;
        tx.commit()?;
        Ok(out)
    }
}
