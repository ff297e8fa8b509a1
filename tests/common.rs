#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn hos() -> Command {
    cargo_bin_cmd!("hoslog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hoslog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB schema and register a driver
pub fn init_db_with_driver(db_path: &str, username: &str) {
    hos()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    hos()
        .args(["--db", db_path, "--test", "driver", "--add", username])
        .assert()
        .success();
}

/// Write an event batch JSON file and return its path
pub fn write_batch(name: &str, json: &str) -> String {
    let p = temp_out(name, "json");
    fs::write(&p, json).expect("write batch file");
    p
}

/// Run `sync` for a batch file
pub fn sync_batch(db_path: &str, driver: &str, batch_path: &str) -> assert_cmd::assert::Assert {
    hos()
        .args(["--db", db_path, "--test", "sync", driver, "--file", batch_path])
        .assert()
}

/// Fetch the day views as parsed JSON via `logs --json`
pub fn logs_json(db_path: &str, driver: &str, days: &str) -> serde_json::Value {
    let output = hos()
        .args(["--db", db_path, "--test", "logs", driver, "--days", days, "--json"])
        .output()
        .expect("run logs --json");
    assert!(output.status.success(), "logs --json failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    serde_json::from_str(stdout.trim()).expect("parse logs JSON")
}

/// Today's UTC date as YYYY-MM-DD (log dates are UTC-based)
pub fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

/// A date `n` days before today (UTC), as YYYY-MM-DD
pub fn days_ago(n: i64) -> String {
    (chrono::Utc::now().date_naive() - chrono::Duration::days(n)).to_string()
}
