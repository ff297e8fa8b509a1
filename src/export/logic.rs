use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::EventExport;
use crate::export::range::parse_range;
use crate::ui::messages::warning;

use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use chrono::NaiveDate;
use rusqlite::{Row, params};
use std::io;
use std::path::Path;

/// High-level export pipeline: load, filter, dispatch by format.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the flattened duty-event rows of one driver.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"`, or one of
    ///   `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `A:B` with matching granularity
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        driver: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let date_bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let events_vec = load_events(pool, driver, date_bounds)?;

        if events_vec.is_empty() {
            warning("No events found for selected range.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&events_vec, path)?,
            ExportFormat::Json => export_json(&events_vec, path)?,
            ExportFormat::Xlsx => export_xlsx(&events_vec, path)?,
        }

        Ok(())
    }
}

/// Load a driver's events joined with their daily log, inside the bounds.
fn load_events(
    pool: &mut DbPool,
    driver: &str,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<EventExport>> {
    let conn = &mut pool.conn;

    let mut events = Vec::new();

    match bounds {
        None => {
            let mut stmt = conn.prepare(
                "SELECT e.id, d.username, l.log_date, e.event_time, e.status,
                        e.location, e.odometer, e.engine_hours, e.device_id, e.client_event_id
                 FROM duty_events e
                 JOIN daily_logs l ON l.id = e.log_id
                 JOIN drivers d ON d.id = l.driver_id
                 WHERE d.username = ?1
                 ORDER BY l.log_date ASC, e.event_time ASC",
            )?;

            let rows = stmt.query_map([driver], map_row)?;

            for r in rows {
                events.push(r?);
            }
        }
        Some((start, end)) => {
            let start_str = start.format("%Y-%m-%d").to_string();
            let end_str = end.format("%Y-%m-%d").to_string();

            let mut stmt = conn.prepare(
                "SELECT e.id, d.username, l.log_date, e.event_time, e.status,
                        e.location, e.odometer, e.engine_hours, e.device_id, e.client_event_id
                 FROM duty_events e
                 JOIN daily_logs l ON l.id = e.log_id
                 JOIN drivers d ON d.id = l.driver_id
                 WHERE d.username = ?1 AND l.log_date BETWEEN ?2 AND ?3
                 ORDER BY l.log_date ASC, e.event_time ASC",
            )?;

            let rows = stmt.query_map(params![driver, start_str, end_str], map_row)?;

            for r in rows {
                events.push(r?);
            }
        }
    }

    Ok(events)
}

/// Mapping DB → EventExport (shared by both queries).
fn map_row(row: &Row<'_>) -> rusqlite::Result<EventExport> {
    Ok(EventExport {
        id: row.get(0)?,
        driver: row.get(1)?,
        log_date: row.get(2)?,
        time: row.get(3)?,
        status: row.get(4)?,
        location: row.get(5)?,
        odometer: row.get(6)?,
        engine_hours: row.get(7)?,
        device_id: row.get(8)?,
        client_event_id: row.get(9)?,
    })
}
