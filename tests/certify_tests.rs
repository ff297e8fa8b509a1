use predicates::str::contains;

mod common;
use common::{days_ago, hos, init_db_with_driver, logs_json, setup_test_db};

fn certify(db: &str, driver: &str, date: &str, sig: &str, certifier: &str) {
    hos()
        .args([
            "--db",
            db,
            "--test",
            "certify",
            driver,
            date,
            "--signature",
            sig,
            "--certifier",
            certifier,
        ])
        .assert()
        .success();
}

#[test]
fn certify_creates_the_log_when_absent() {
    let db = setup_test_db("certify_create");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    certify(&db, "jdoe", &date, "sig-data", "Alice");

    let views = logs_json(&db, "jdoe", "7");
    let day = &views[0];
    assert_eq!(day["date"], date);
    assert_eq!(day["certified"], true);
    assert_eq!(day["certifiedBy"], "Alice");
    // A log born from certification has no events or samples.
    assert_eq!(day["events"].as_array().unwrap().len(), 0);
    assert_eq!(day["hourlySamples"].as_array().unwrap().len(), 0);
}

#[test]
fn second_certification_overwrites_the_first() {
    let db = setup_test_db("certify_overwrite");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    certify(&db, "jdoe", &date, "sigA", "Alice");
    certify(&db, "jdoe", &date, "sigB", "Bob");

    let views = logs_json(&db, "jdoe", "7");
    let day = &views[0];
    assert_eq!(day["certified"], true);
    assert_eq!(day["certifiedBy"], "Bob");

    let sig: Vec<u8> = day["signature"]
        .as_array()
        .expect("signature bytes")
        .iter()
        .map(|v| v.as_u64().unwrap() as u8)
        .collect();
    assert_eq!(sig, b"sigB");

    // Only one log row, one certification state.
    let conn = rusqlite::Connection::open(&db).expect("open db");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM daily_logs", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 1);
}

#[test]
fn certify_requires_a_signature() {
    let db = setup_test_db("certify_nosig");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    hos()
        .args(["--db", &db, "--test", "certify", "jdoe", &date])
        .assert()
        .failure()
        .stderr(contains("signature is required"));
}

#[test]
fn certify_fails_for_unknown_driver() {
    let db = setup_test_db("certify_nodriver");

    hos()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();

    let date = days_ago(1);
    hos()
        .args([
            "--db",
            &db,
            "--test",
            "certify",
            "ghost",
            &date,
            "--signature",
            "sig",
        ])
        .assert()
        .failure()
        .stderr(contains("Driver not found: ghost"));
}
