pub mod begin;
pub mod config;
pub mod end;
pub mod init;
pub mod list;
pub mod log;
pub mod project;
pub mod report;
pub mod status;

use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::store::{SqliteStore, Store};
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Open the configured store and make sure it carries our schema.
pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    let store = SqliteStore::open(cfg.database_path())?;
    store.check_schema()?;
    Ok(store)
}

/// Append to the internal log; a failure here never fails the command.
pub(crate) fn audit(store: &SqliteStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(store.conn(), operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
