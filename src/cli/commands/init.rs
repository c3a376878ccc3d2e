use crate::cli::parser::Cli;
use crate::cli::commands::audit;
use crate::config::Config;
use crate::db::store::{SqliteStore, Store};
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::fs;

/// Handle the `init` command
///
/// This initializes:
///  - the SQLite database schema
///  - the configuration file (skipped in test mode)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = cfg.database_path();

    println!("⚙️  Initializing tire…");

    println!("🗄️  Database    : {}", db_path.display());

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let store = SqliteStore::open(&db_path)?;
    store.initialize()?;

    // only point the config at a database that was actually created
    if !cli.test {
        let path = cfg.save()?;
        println!("📄 Config file : {}", path.display());
    }

    audit(
        &store,
        "init",
        "",
        &format!("Database initialized at {}", db_path.display()),
    );

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
