use chrono::{NaiveDate, Utc};

/// Today's calendar date in UTC; log dates are always UTC-based.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
