use predicates::str::contains;

mod common;
use common::{days_ago, hos, init_db_with_driver, setup_test_db, sync_batch, write_batch};

#[test]
fn sync_saves_events_and_reports_ids() {
    let db = setup_test_db("ingest_basic");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    let batch = write_batch(
        "ingest_basic",
        &format!(
            r#"[
              {{"clientEventId":"a-1","status":"OFF_DUTY","time":"{date}T00:00:00Z","logDate":"{date}"}},
              {{"clientEventId":"a-2","status":"DRIVING","time":"{date}T08:00:00Z","logDate":"{date}"}}
            ]"#
        ),
    );

    sync_batch(&db, "jdoe", &batch)
        .success()
        .stdout(contains("saved: a-1"))
        .stdout(contains("saved: a-2"));
}

#[test]
fn sync_is_idempotent_per_client_event_id() {
    let db = setup_test_db("ingest_idem");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    let batch = write_batch(
        "ingest_idem",
        &format!(
            r#"[{{"clientEventId":"dup-1","status":"DRIVING","time":"{date}T06:00:00Z","logDate":"{date}"}}]"#
        ),
    );

    // Same batch twice: both runs report the id as saved.
    sync_batch(&db, "jdoe", &batch)
        .success()
        .stdout(contains("saved: dup-1"));
    sync_batch(&db, "jdoe", &batch)
        .success()
        .stdout(contains("saved: dup-1"));

    // Exactly one stored row.
    let conn = rusqlite::Connection::open(&db).expect("open db");
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM duty_events WHERE client_event_id = 'dup-1'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 1);
}

#[test]
fn sync_fails_for_unknown_driver() {
    let db = setup_test_db("ingest_nodriver");

    hos()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();

    let date = days_ago(1);
    let batch = write_batch(
        "ingest_nodriver",
        &format!(
            r#"[{{"clientEventId":"x-1","status":"DRIVING","time":"{date}T06:00:00Z"}}]"#
        ),
    );

    sync_batch(&db, "ghost", &batch)
        .failure()
        .stderr(contains("Driver not found: ghost"));
}

#[test]
fn malformed_items_are_dropped_not_fatal() {
    let db = setup_test_db("ingest_malformed");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    // Second item has no time, third has no status, fourth has no id.
    let batch = write_batch(
        "ingest_malformed",
        &format!(
            r#"[
              {{"clientEventId":"ok-1","status":"ON_DUTY","time":"{date}T09:00:00Z","logDate":"{date}"}},
              {{"clientEventId":"bad-1","status":"DRIVING","logDate":"{date}"}},
              {{"clientEventId":"bad-2","time":"{date}T10:00:00Z","logDate":"{date}"}},
              {{"status":"DRIVING","time":"{date}T11:00:00Z","logDate":"{date}"}}
            ]"#
        ),
    );

    sync_batch(&db, "jdoe", &batch)
        .success()
        .stdout(contains("saved: ok-1"))
        .stdout(contains("3 malformed events dropped"));

    let conn = rusqlite::Connection::open(&db).expect("open db");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM duty_events", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 1);
}

#[test]
fn batch_spanning_multiple_dates_creates_one_log_per_date() {
    let db = setup_test_db("ingest_multidate");
    init_db_with_driver(&db, "jdoe");

    let d1 = days_ago(2);
    let d2 = days_ago(1);
    let batch = write_batch(
        "ingest_multidate",
        &format!(
            r#"[
              {{"clientEventId":"m-1","status":"OFF_DUTY","time":"{d1}T22:00:00Z"}},
              {{"clientEventId":"m-2","status":"DRIVING","time":"{d2}T04:00:00Z"}}
            ]"#
        ),
    );

    sync_batch(&db, "jdoe", &batch).success();

    let conn = rusqlite::Connection::open(&db).expect("open db");
    let logs: i64 = conn
        .query_row("SELECT COUNT(*) FROM daily_logs", [], |row| row.get(0))
        .expect("count");
    assert_eq!(logs, 2);
}

#[test]
fn explicit_log_date_overrides_event_time_grouping() {
    let db = setup_test_db("ingest_explicit_date");
    init_db_with_driver(&db, "jdoe");

    let stamp_day = days_ago(3);
    let group_day = days_ago(1);
    let batch = write_batch(
        "ingest_explicit_date",
        &format!(
            r#"[{{"clientEventId":"g-1","status":"ON_DUTY","time":"{stamp_day}T12:00:00Z","logDate":"{group_day}"}}]"#
        ),
    );

    sync_batch(&db, "jdoe", &batch).success();

    let conn = rusqlite::Connection::open(&db).expect("open db");
    let log_date: String = conn
        .query_row("SELECT log_date FROM daily_logs LIMIT 1", [], |row| {
            row.get(0)
        })
        .expect("log_date");
    assert_eq!(log_date, group_day);
}
