mod common;
use common::{days_ago, init_db_with_driver, logs_json, setup_test_db, sync_batch, write_batch};

/// Full-day scenario: OFF at 00, DRIVING at 08, ON_DUTY at 12.
#[test]
fn full_day_grid_and_summary() {
    let db = setup_test_db("grid_full_day");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    let batch = write_batch(
        "grid_full_day",
        &format!(
            r#"[
              {{"clientEventId":"d-1","status":"OFF_DUTY","time":"{date}T00:00:00Z","logDate":"{date}"}},
              {{"clientEventId":"d-2","status":"DRIVING","time":"{date}T08:00:00Z","logDate":"{date}"}},
              {{"clientEventId":"d-3","status":"ON_DUTY","time":"{date}T12:00:00Z","logDate":"{date}"}}
            ]"#
        ),
    );
    sync_batch(&db, "jdoe", &batch).success();

    let views = logs_json(&db, "jdoe", "7");
    let day = &views[0];
    assert_eq!(day["date"], date);

    let samples = day["hourlySamples"].as_array().expect("samples array");
    assert_eq!(samples.len(), 24);

    for s in samples {
        let hour = s["hour"].as_u64().expect("hour");
        let expected = match hour {
            0..=7 => "OFF_DUTY",
            8..=11 => "DRIVING",
            _ => "ON_DUTY",
        };
        assert_eq!(s["status"], expected, "hour {hour}");
    }

    let summary = &day["summary"];
    assert_eq!(summary["break"], 8.0);
    assert_eq!(summary["drive"], 4.0);
    // Trailing ON_DUTY interval is not bucketed.
    assert_eq!(summary["shift"], 0.0);
    assert_eq!(summary["cycle"], 70.0);
    assert_eq!(summary["lastStatus"], "DRIVING");
}

/// A second sync recomputes the grid from the merged event set.
#[test]
fn grid_is_recomputed_after_each_sync() {
    let db = setup_test_db("grid_recompute");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    let first = write_batch(
        "grid_recompute_1",
        &format!(
            r#"[{{"clientEventId":"r-1","status":"ON_DUTY","time":"{date}T10:00:00Z","logDate":"{date}"}}]"#
        ),
    );
    sync_batch(&db, "jdoe", &first).success();

    let views = logs_json(&db, "jdoe", "7");
    let samples = views[0]["hourlySamples"].as_array().expect("samples");
    // ON_DUTY from 10:00 to end of day.
    assert_eq!(samples.len(), 14);
    assert_eq!(samples[0]["hour"], 10);

    // An earlier DRIVING event extends coverage back to 06:00 and takes
    // over the 06-09 slots.
    let second = write_batch(
        "grid_recompute_2",
        &format!(
            r#"[{{"clientEventId":"r-2","status":"DRIVING","time":"{date}T06:00:00Z","logDate":"{date}"}}]"#
        ),
    );
    sync_batch(&db, "jdoe", &second).success();

    let views = logs_json(&db, "jdoe", "7");
    let samples = views[0]["hourlySamples"].as_array().expect("samples");
    assert_eq!(samples.len(), 18);
    assert_eq!(samples[0]["hour"], 6);
    assert_eq!(samples[0]["status"], "DRIVING");
    assert_eq!(samples[4]["hour"], 10);
    assert_eq!(samples[4]["status"], "ON_DUTY");

    // Full replace: no duplicated hours in storage.
    let conn = rusqlite::Connection::open(&db).expect("open db");
    let dup: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM (SELECT hour FROM hourly_samples GROUP BY log_id, hour HAVING COUNT(*) > 1)",
            [],
            |row| row.get(0),
        )
        .expect("dup count");
    assert_eq!(dup, 0);
}

/// Sub-hour transitions collapse into a single slot by precedence.
#[test]
fn driving_takes_the_shared_hour() {
    let db = setup_test_db("grid_precedence");
    init_db_with_driver(&db, "jdoe");

    let date = days_ago(1);
    let batch = write_batch(
        "grid_precedence",
        &format!(
            r#"[
              {{"clientEventId":"p-1","status":"OFF_DUTY","time":"{date}T00:00:00Z","logDate":"{date}"}},
              {{"clientEventId":"p-2","status":"DRIVING","time":"{date}T08:45:00Z","logDate":"{date}"}}
            ]"#
        ),
    );
    sync_batch(&db, "jdoe", &batch).success();

    let views = logs_json(&db, "jdoe", "7");
    let samples = views[0]["hourlySamples"].as_array().expect("samples");

    let hour8 = samples.iter().find(|s| s["hour"] == 8).expect("hour 8");
    assert_eq!(hour8["status"], "DRIVING");
}
