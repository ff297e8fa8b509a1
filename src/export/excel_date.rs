use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Try to interpret a string as a datetime or date, returning the Excel
/// serial value plus its number format.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    // RFC 3339 event timestamps (always UTC in storage)
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        let serial = naive_datetime_to_excel_serial(&dt.naive_utc());
        return Some(("yyyy-mm-dd hh:mm", serial));
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        let serial = naive_datetime_to_excel_serial(&dt);
        return Some(("yyyy-mm-dd", serial));
    }

    None
}

fn naive_datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .expect("fixed epoch")
        .and_hms_opt(0, 0, 0)
        .expect("fixed epoch");

    let duration = *dt - excel_epoch;

    let days = duration.num_days() as f64;
    let secs = (duration.num_seconds() - duration.num_days() * 86400) as f64;

    days + secs / 86400.0
}
