//! Row mapping and timestamp conversion shared by the store queries.

use crate::errors::AppError;
use crate::models::project::Project;
use crate::models::record::Record;
use chrono::NaiveDateTime;
use rusqlite::{Result, Row};

/// Fixed-width storage format: lexical order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub const RECORD_COLUMNS: &str = r#"id, project, creation_time, "begin", "end""#;

pub fn ts_to_sql(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn ts_from_sql(col: usize, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            col,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(raw.to_string())),
        )
    })
}

pub fn map_record(row: &Row) -> Result<Record> {
    let creation_str: String = row.get("creation_time")?;
    let begin_str: String = row.get("begin")?;
    let end_str: Option<String> = row.get("end")?;

    let end = match end_str {
        Some(s) => Some(ts_from_sql(4, &s)?),
        None => None,
    };

    Ok(Record {
        id: row.get("id")?,
        project: row.get("project")?,
        creation_time: ts_from_sql(2, &creation_str)?,
        begin: ts_from_sql(3, &begin_str)?,
        end,
    })
}

pub fn map_project(row: &Row) -> Result<Project> {
    let creation_str: String = row.get("creation_time")?;
    Ok(Project {
        name: row.get("name")?,
        creation_time: ts_from_sql(1, &creation_str)?,
    })
}
