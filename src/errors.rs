//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use chrono::NaiveDateTime;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store
    // ---------------------------
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Project '{0}' already exists")]
    DuplicateProject(String),

    #[error("Unknown project '{0}'. Add it first with `tire project add`.")]
    UnknownProject(String),

    // ---------------------------
    // Session state machine
    // ---------------------------
    #[error("Close the current project '{project}' first")]
    SessionAlreadyOpen { project: String },

    #[error("There is no open session to close")]
    NoOpenSession,

    #[error(
        "Provided project name '{provided}' does not match open project '{expected}'. \
         Tip: don't provide a project name."
    )]
    ProjectMismatch { provided: String, expected: String },

    #[error("End {end} is before begin {begin}")]
    EndBeforeBegin {
        begin: NaiveDateTime,
        end: NaiveDateTime,
    },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Failed to parse '{0}' into time or datetime")]
    InvalidTimestamp(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0} (expected day, week, month or year)")]
    InvalidPeriod(String),

    #[error("Invalid duration '{0}' (expected e.g. 8h, 7h30m or 450m)")]
    InvalidDuration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
