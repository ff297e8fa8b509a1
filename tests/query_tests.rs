use predicates::str::contains;

mod common;
use common::{days_ago, hos, init_db_with_driver, logs_json, setup_test_db, sync_batch, write_batch};

#[test]
fn driver_with_no_logs_yields_an_empty_list() {
    let db = setup_test_db("query_empty");
    init_db_with_driver(&db, "jdoe");

    let views = logs_json(&db, "jdoe", "1");
    assert_eq!(views.as_array().expect("array").len(), 0);
}

#[test]
fn unknown_driver_yields_an_empty_list_not_an_error() {
    let db = setup_test_db("query_unknown");

    hos()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();

    let views = logs_json(&db, "nobody", "7");
    assert_eq!(views.as_array().expect("array").len(), 0);
}

#[test]
fn log_without_events_gets_the_default_summary() {
    let db = setup_test_db("query_no_events");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    // Metadata-only log: no events were ever synced.
    hos()
        .args([
            "--db", &db, "--test", "form", "jdoe", &date,
            "--set", "vehicle=TRK-1",
        ])
        .assert()
        .success();

    let views = logs_json(&db, "jdoe", "7");
    let day = &views[0];

    assert_eq!(day["events"].as_array().unwrap().len(), 0);
    assert_eq!(day["hourlySamples"].as_array().unwrap().len(), 0);
    assert_eq!(day["summary"]["drive"], 0.0);
    assert_eq!(day["summary"]["break"], 0.0);
    assert_eq!(day["summary"]["shift"], 0.0);
    assert_eq!(day["summary"]["lastStatus"], "OFF_DUTY");
    assert!(day["summary"]["vehicle"].is_null());
}

#[test]
fn views_come_newest_first_within_the_window() {
    let db = setup_test_db("query_order");
    init_db_with_driver(&db, "jdoe");

    let older = days_ago(3);
    let newer = days_ago(1);
    let batch = write_batch(
        "query_order",
        &format!(
            r#"[
              {{"clientEventId":"o-1","status":"ON_DUTY","time":"{older}T08:00:00Z"}},
              {{"clientEventId":"o-2","status":"DRIVING","time":"{newer}T08:00:00Z"}}
            ]"#
        ),
    );
    sync_batch(&db, "jdoe", &batch).success();

    let views = logs_json(&db, "jdoe", "7");
    assert_eq!(views[0]["date"], newer);
    assert_eq!(views[1]["date"], older);
}

#[test]
fn days_window_excludes_older_logs() {
    let db = setup_test_db("query_window");
    init_db_with_driver(&db, "jdoe");

    let outside = days_ago(5);
    let inside = days_ago(1);
    let batch = write_batch(
        "query_window",
        &format!(
            r#"[
              {{"clientEventId":"w-1","status":"ON_DUTY","time":"{outside}T08:00:00Z"}},
              {{"clientEventId":"w-2","status":"DRIVING","time":"{inside}T08:00:00Z"}}
            ]"#
        ),
    );
    sync_batch(&db, "jdoe", &batch).success();

    let views = logs_json(&db, "jdoe", "2");
    let arr = views.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["date"], inside);
}

#[test]
fn grid_view_renders_without_json_flag() {
    let db = setup_test_db("query_grid_render");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    let batch = write_batch(
        "query_grid_render",
        &format!(
            r#"[{{"clientEventId":"g-1","status":"DRIVING","time":"{date}T08:00:00Z","logDate":"{date}"}}]"#
        ),
    );
    sync_batch(&db, "jdoe", &batch).success();

    hos()
        .args(["--db", &db, "--test", "logs", "jdoe", "--days", "7"])
        .assert()
        .success()
        .stdout(contains(date))
        .stdout(contains("Drive"))
        .stdout(contains("uncertified"));
}
