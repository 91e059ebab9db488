#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, isolated from the user's configuration and credentials.
pub fn ts(name: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("timeslice");
    cmd.env("TIMESLICE_CONFIG", temp_path(name, "conf"))
        .env_remove("SPREADSHEET_ID")
        .env_remove("GOOGLE_ACCESS_TOKEN")
        .env_remove("SHEETS_API_BASE")
        .env_remove("RUST_LOG");
    cmd
}

/// A path in the system temp dir, removed if it already exists
pub fn temp_path(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timeslice.{}", name, ext));
    path.to_string_lossy().to_string()
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let db_path = temp_path(name, "sqlite");
    fs::remove_file(&db_path).ok();
    fs::remove_file(temp_path(name, "conf")).ok();
    db_path
}

/// Write `content` to a temporary JSON file and return its path
pub fn write_json(name: &str, content: &str) -> String {
    let path = temp_path(name, "json");
    fs::write(&path, content).expect("write json fixture");
    path
}

/// Initialize a sqlite-backed setup
pub fn init_sqlite(name: &str, db_path: &str) {
    ts(name)
        .args(["--backend", "sqlite", "--db", db_path, "init"])
        .assert()
        .success();
}
