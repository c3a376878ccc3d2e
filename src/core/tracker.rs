//! Begin/end state machine over the store.
//!
//! The tracker keeps no state of its own: every transition asks the store for
//! the open record inside an immediate transaction, so a crash or a restart can
//! never leave it out of sync with what is on disk.

use crate::core::clock::Clock;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active(Record),
}

pub struct SessionTracker<'a, S: Store> {
    store: &'a S,
    clock: &'a dyn Clock,
}

impl<'a, S: Store> SessionTracker<'a, S> {
    pub fn new(store: &'a S, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    pub fn status(&self) -> AppResult<SessionState> {
        Ok(match self.store.find_open_record()? {
            Some(record) => SessionState::Active(record),
            None => SessionState::Idle,
        })
    }

    /// Idle → Active. Opens a record for `project` starting at `at`.
    pub fn begin(&self, project: &str, at: NaiveDateTime) -> AppResult<Record> {
        let now = self.clock.now();

        self.store.atomically(|store| {
            if store.get_project(project)?.is_none() {
                return Err(AppError::UnknownProject(project.to_string()));
            }

            if let Some(open) = store.find_open_record()? {
                return Err(AppError::SessionAlreadyOpen {
                    project: open.project,
                });
            }

            let id = store.add_record(project, at, now)?;
            Ok(Record {
                id,
                project: project.to_string(),
                creation_time: now,
                begin: at,
                end: None,
            })
        })
    }

    /// Active → Idle. Closes the open record at `at`.
    ///
    /// When `project` is given it must name the open record's project.
    pub fn end(&self, project: Option<&str>, at: NaiveDateTime) -> AppResult<Record> {
        self.store.atomically(|store| {
            let open = store.find_open_record()?.ok_or(AppError::NoOpenSession)?;

            if let Some(name) = project
                && name != open.project
            {
                return Err(AppError::ProjectMismatch {
                    provided: name.to_string(),
                    expected: open.project,
                });
            }

            if at < open.begin {
                return Err(AppError::EndBeforeBegin {
                    begin: open.begin,
                    end: at,
                });
            }

            store.close_open_record(open.id, at)?;
            Ok(Record {
                end: Some(at),
                ..open
            })
        })
    }
}
