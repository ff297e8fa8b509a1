use crate::errors::{AppError, AppResult};
use crate::models::daily_log::DailyLog;
use crate::models::driver::Driver;
use crate::models::duty_event::DutyEvent;
use crate::models::duty_status::DutyStatus;
use crate::models::hourly_sample::HourlySample;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn parse_utc(col: &str, s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(format!("{col}: {s}"))),
            )
        })
}

fn parse_status(s: &str) -> Result<DutyStatus> {
    DutyStatus::from_db_str(s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(s.to_string())),
        )
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

fn parse_metadata(s: &str) -> Result<Map<String, Value>> {
    serde_json::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidMetadata(e.to_string())),
        )
    })
}

pub fn map_event_row(row: &Row) -> Result<DutyEvent> {
    let time_str: String = row.get("event_time")?;
    let status_str: String = row.get("status")?;

    Ok(DutyEvent {
        id: row.get("id")?,
        log_id: row.get("log_id")?,
        status: parse_status(&status_str)?,
        time: parse_utc("event_time", &time_str)?,
        location: row.get("location")?,
        odometer: row.get("odometer")?,
        engine_hours: row.get("engine_hours")?,
        device_id: row.get("device_id")?,
        client_event_id: row.get("client_event_id")?,
        created_at: row.get("created_at")?,
    })
}

pub fn map_log_row(row: &Row) -> Result<DailyLog> {
    let date_str: String = row.get("log_date")?;
    let meta_str: String = row.get("metadata")?;

    Ok(DailyLog {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        log_date: parse_date(&date_str)?,
        metadata: parse_metadata(&meta_str)?,
        certified: row.get::<_, i64>("certified")? != 0,
        certified_at: row.get("certified_at")?,
        certified_by: row.get("certified_by")?,
        signature: row.get("signature")?,
    })
}

pub fn map_sample_row(row: &Row) -> Result<HourlySample> {
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;
    let status_str: String = row.get("status")?;

    Ok(HourlySample {
        hour: row.get("hour")?,
        start_time: parse_utc("start_time", &start_str)?,
        end_time: parse_utc("end_time", &end_str)?,
        status: parse_status(&status_str)?,
        event_id: row.get("event_id")?,
        odometer: row.get("odometer")?,
        engine_hours: row.get("engine_hours")?,
        location: row.get("location")?,
    })
}

fn map_driver_row(row: &Row) -> Result<Driver> {
    Ok(Driver {
        id: row.get("id")?,
        username: row.get("username")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
    })
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

pub fn find_driver_by_username(conn: &Connection, username: &str) -> AppResult<Option<Driver>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM drivers WHERE username = ?1 LIMIT 1")?;
    let driver = stmt.query_row([username], map_driver_row).optional()?;
    Ok(driver)
}

/// Resolve a username or fail the whole call.
pub fn require_driver(conn: &Connection, username: &str) -> AppResult<Driver> {
    find_driver_by_username(conn, username)?
        .ok_or_else(|| AppError::DriverNotFound(username.to_string()))
}

pub fn insert_driver(
    conn: &Connection,
    username: &str,
    first_name: &str,
    last_name: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO drivers (username, first_name, last_name, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![username, first_name, last_name, Utc::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_drivers(conn: &Connection) -> AppResult<Vec<Driver>> {
    let mut stmt = conn.prepare("SELECT * FROM drivers ORDER BY username ASC")?;
    let rows = stmt.query_map([], map_driver_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Daily logs
// ---------------------------------------------------------------------------

pub fn find_daily_log(
    conn: &Connection,
    driver_id: i64,
    log_date: NaiveDate,
) -> AppResult<Option<DailyLog>> {
    let mut stmt = conn
        .prepare_cached("SELECT * FROM daily_logs WHERE driver_id = ?1 AND log_date = ?2 LIMIT 1")?;
    let log = stmt
        .query_row(params![driver_id, log_date.to_string()], map_log_row)
        .optional()?;
    Ok(log)
}

/// Fetch the (driver, date) log row, creating it when absent.
///
/// Callers that need the get-or-create to be race-free must already hold the
/// database write lock (an immediate transaction); the UNIQUE(driver_id,
/// log_date) constraint backs the invariant either way.
pub fn get_or_create_daily_log(
    conn: &Connection,
    driver_id: i64,
    log_date: NaiveDate,
) -> AppResult<DailyLog> {
    if let Some(log) = find_daily_log(conn, driver_id, log_date)? {
        return Ok(log);
    }

    conn.execute(
        "INSERT INTO daily_logs (driver_id, log_date) VALUES (?1, ?2)",
        params![driver_id, log_date.to_string()],
    )?;

    find_daily_log(conn, driver_id, log_date)?
        .ok_or_else(|| AppError::Other(format!("daily log vanished after insert: {log_date}")))
}

pub fn update_log_metadata(
    conn: &Connection,
    log_id: i64,
    metadata: &Map<String, Value>,
) -> AppResult<()> {
    let meta_str = serde_json::to_string(metadata)
        .map_err(|e| AppError::InvalidMetadata(e.to_string()))?;
    conn.execute(
        "UPDATE daily_logs SET metadata = ?1 WHERE id = ?2",
        params![meta_str, log_id],
    )?;
    Ok(())
}

/// Stamp (or re-stamp) a log's certification. Later calls overwrite earlier
/// ones entirely; no history is kept.
pub fn set_certification(
    conn: &Connection,
    log_id: i64,
    signature: &[u8],
    certifier_name: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE daily_logs
         SET certified = 1, certified_at = ?1, certified_by = ?2, signature = ?3
         WHERE id = ?4",
        params![Utc::now().to_rfc3339(), certifier_name, signature, log_id],
    )?;
    Ok(())
}

/// Logs for a driver with log_date >= since, newest first.
pub fn load_logs_for_driver_since(
    conn: &Connection,
    driver_id: i64,
    since: NaiveDate,
) -> AppResult<Vec<DailyLog>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM daily_logs
         WHERE driver_id = ?1 AND log_date >= ?2
         ORDER BY log_date DESC",
    )?;
    let rows = stmt.query_map(params![driver_id, since.to_string()], map_log_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Duty events
// ---------------------------------------------------------------------------

pub fn load_events_by_log(conn: &Connection, log_id: i64) -> AppResult<Vec<DutyEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM duty_events
         WHERE log_id = ?1
         ORDER BY event_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([log_id], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn event_exists_by_client_id(conn: &Connection, client_event_id: &str) -> AppResult<bool> {
    let mut stmt =
        conn.prepare_cached("SELECT 1 FROM duty_events WHERE client_event_id = ?1 LIMIT 1")?;
    Ok(stmt.exists([client_event_id])?)
}

pub struct NewDutyEvent<'a> {
    pub log_id: i64,
    pub status: DutyStatus,
    pub time: DateTime<Utc>,
    pub location: Option<&'a str>,
    pub odometer: Option<f64>,
    pub engine_hours: Option<f64>,
    pub device_id: Option<&'a str>,
    pub client_event_id: &'a str,
}

pub fn insert_duty_event(conn: &Connection, ev: &NewDutyEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO duty_events
           (log_id, status, event_time, location, odometer, engine_hours,
            device_id, client_event_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            ev.log_id,
            ev.status.to_db_str(),
            ev.time.to_rfc3339(),
            ev.location,
            ev.odometer,
            ev.engine_hours,
            ev.device_id,
            ev.client_event_id,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ---------------------------------------------------------------------------
// Hourly samples
// ---------------------------------------------------------------------------

/// Replace the full sample set of a log with a freshly computed one.
/// Delete-then-insert: a shrunk event set can never leave stale hours behind.
pub fn replace_hourly_samples(
    conn: &Connection,
    log_id: i64,
    samples: &[HourlySample],
) -> AppResult<()> {
    conn.execute("DELETE FROM hourly_samples WHERE log_id = ?1", [log_id])?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO hourly_samples
           (log_id, hour, start_time, end_time, status, event_id,
            odometer, engine_hours, location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;

    for s in samples {
        stmt.execute(params![
            log_id,
            s.hour,
            s.start_time.to_rfc3339(),
            s.end_time.to_rfc3339(),
            s.status.to_db_str(),
            s.event_id,
            s.odometer,
            s.engine_hours,
            s.location,
        ])?;
    }

    Ok(())
}

pub fn load_samples_by_log(conn: &Connection, log_id: i64) -> AppResult<Vec<HourlySample>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM hourly_samples
         WHERE log_id = ?1
         ORDER BY hour ASC",
    )?;
    let rows = stmt.query_map([log_id], map_sample_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
