use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the core schema: drivers, daily logs, duty events, hourly samples.
///
/// `duty_events` is append-only and carries the global idempotency key;
/// `hourly_samples` is a derived cache, unique per (log, hour).
fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS drivers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            first_name  TEXT NOT NULL DEFAULT '',
            last_name   TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS daily_logs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_id    INTEGER NOT NULL REFERENCES drivers(id),
            log_date     TEXT NOT NULL,
            metadata     TEXT NOT NULL DEFAULT '{}',
            certified    INTEGER NOT NULL DEFAULT 0,
            certified_at TEXT,
            certified_by TEXT,
            signature    BLOB,
            UNIQUE(driver_id, log_date)
        );

        CREATE TABLE IF NOT EXISTS duty_events (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            log_id          INTEGER NOT NULL REFERENCES daily_logs(id),
            status          TEXT NOT NULL
                            CHECK(status IN ('OFF_DUTY','SLEEPER','DRIVING','ON_DUTY')),
            event_time      TEXT NOT NULL,
            location        TEXT,
            odometer        REAL,
            engine_hours    REAL,
            device_id       TEXT,
            client_event_id TEXT NOT NULL UNIQUE,
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS hourly_samples (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            log_id       INTEGER NOT NULL REFERENCES daily_logs(id),
            hour         INTEGER NOT NULL CHECK(hour BETWEEN 0 AND 23),
            start_time   TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            status       TEXT NOT NULL,
            event_id     INTEGER REFERENCES duty_events(id),
            odometer     REAL,
            engine_hours REAL,
            location     TEXT,
            UNIQUE(log_id, hour)
        );

        CREATE INDEX IF NOT EXISTS idx_daily_logs_driver_date ON daily_logs(driver_id, log_date);
        CREATE INDEX IF NOT EXISTS idx_duty_events_log_time ON duty_events(log_id, event_time);
        CREATE INDEX IF NOT EXISTS idx_hourly_samples_log ON hourly_samples(log_id);
        "#,
    )?;
    Ok(())
}

/// Check if `duty_events` has a `device_id` column.
fn events_has_device_id_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('duty_events')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "device_id" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Early databases stored the reporting device only inside metadata;
/// add the dedicated column when missing.
fn migrate_add_device_id_column(conn: &Connection) -> Result<()> {
    let version = "20250412_0003_add_event_device_id";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if events_has_device_id_column(conn)? {
        // Fresh schema already carries the column; just record the marker.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'device_id present at creation')",
            [version],
        )?;
        return Ok(());
    }

    conn.execute("ALTER TABLE duty_events ADD COLUMN device_id TEXT;", [])?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added device_id to duty_events')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'device_id' to duty_events table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Core schema
    let had_events = table_exists(conn, "duty_events")?;
    create_core_tables(conn)?;
    if !had_events {
        success("Created duty-status schema (drivers, daily_logs, duty_events, hourly_samples).");
    }

    // 3) Additive migrations
    migrate_add_device_id_column(conn)?;

    Ok(())
}
