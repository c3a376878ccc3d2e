#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tire() -> Command {
    cargo_bin_cmd!("tire")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tire.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Run a command against `db_path` and require success
pub fn ok(db_path: &str, args: &[&str]) {
    tire()
        .args(["--db", db_path, "--test"])
        .args(args)
        .assert()
        .success();
}

/// Initialize the DB and add the given projects
pub fn init_db_with_projects(db_path: &str, projects: &[&str]) {
    ok(db_path, &["init"]);
    for p in projects {
        ok(db_path, &["project", "add", p]);
    }
}

/// Stdout of a successful command
pub fn stdout_of(db_path: &str, args: &[&str]) -> String {
    let out = tire()
        .args(["--db", db_path, "--test"])
        .args(args)
        .output()
        .expect("failed to run tire");
    assert!(out.status.success(), "command {:?} failed", args);
    String::from_utf8_lossy(&out.stdout).to_string()
}
