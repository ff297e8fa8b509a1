use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// One row per (driver, calendar date). Created on the first ingested event,
/// first metadata submission, or first certification for that date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: i64,
    pub driver_id: i64,
    pub log_date: NaiveDate,
    /// Free-form per-day form fields. Merged shallowly by top-level key.
    pub metadata: Map<String, Value>,
    pub certified: bool,
    pub certified_at: Option<String>,
    pub certified_by: Option<String>,
    pub signature: Option<Vec<u8>>,
}
