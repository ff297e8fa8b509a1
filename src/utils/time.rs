//! Time utilities: hour-slot bounds and duration formatting.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// UTC start of a calendar day.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}

/// Bounds of one hour slot of a day: `[H:00, H+1:00)`.
pub fn hour_bounds(date: NaiveDate, hour: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day_start(date) + Duration::hours(hour as i64);
    (start, start + Duration::hours(1))
}

/// Format fractional hours as `HHh MMm` for terminal output.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    format!("{:02}h {:02}m", total_minutes / 60, total_minutes % 60)
}
