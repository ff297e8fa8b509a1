use predicates::str::contains;

mod common;
use common::{days_ago, hos, init_db_with_driver, setup_test_db, sync_batch, temp_out, write_batch};

fn seed_events(db: &str) -> String {
    init_db_with_driver(db, "jdoe");

    let date = days_ago(1);
    let batch = write_batch(
        "export_seed",
        &format!(
            r#"[
              {{"clientEventId":"e-1","status":"OFF_DUTY","time":"{date}T00:00:00Z","logDate":"{date}","odometer":1200.5,"deviceId":"ELD-1"}},
              {{"clientEventId":"e-2","status":"DRIVING","time":"{date}T08:00:00Z","logDate":"{date}","location":"I-80 MM 201"}}
            ]"#
        ),
    );
    sync_batch(db, "jdoe", &batch).success();
    date
}

#[test]
fn export_csv_writes_all_event_rows() {
    let db = setup_test_db("export_csv");
    seed_events(&db);

    let out = temp_out("export_csv", "csv");
    hos()
        .args([
            "--db", &db, "--test", "export", "jdoe",
            "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read export");
    assert!(content.contains("client_event_id"));
    assert!(content.contains("e-1"));
    assert!(content.contains("e-2"));
    assert!(content.contains("DRIVING"));
}

#[test]
fn export_json_round_trips_the_rows() {
    let db = setup_test_db("export_json");
    seed_events(&db);

    let out = temp_out("export_json", "json");
    hos()
        .args([
            "--db", &db, "--test", "export", "jdoe",
            "--format", "json", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("parse export");
    let arr = rows.as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["driver"], "jdoe");
    assert_eq!(arr[0]["client_event_id"], "e-1");
    assert_eq!(arr[1]["status"], "DRIVING");
}

#[test]
fn export_xlsx_creates_the_workbook() {
    let db = setup_test_db("export_xlsx");
    seed_events(&db);

    let out = temp_out("export_xlsx", "xlsx");
    hos()
        .args([
            "--db", &db, "--test", "export", "jdoe",
            "--format", "xlsx", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let meta = std::fs::metadata(&out).expect("xlsx file exists");
    assert!(meta.len() > 0);
}

#[test]
fn export_range_filters_by_log_date() {
    let db = setup_test_db("export_range");
    let date = seed_events(&db);

    // A range that cannot contain the seeded date.
    let out = temp_out("export_range", "csv");
    hos()
        .args([
            "--db", &db, "--test", "export", "jdoe",
            "--format", "csv", "--file", &out,
            "--range", "2000-01-01:2000-01-02", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("No events found"));

    // The seeded date itself.
    hos()
        .args([
            "--db", &db, "--test", "export", "jdoe",
            "--format", "csv", "--file", &out,
            "--range", &date, "--force",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).expect("read export");
    assert!(content.contains("e-1"));
}

#[test]
fn export_rejects_relative_paths() {
    let db = setup_test_db("export_relpath");
    seed_events(&db);

    hos()
        .args([
            "--db", &db, "--test", "export", "jdoe",
            "--format", "csv", "--file", "relative.csv", "--force",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}
