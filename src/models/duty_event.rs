use super::duty_status::DutyStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored duty-status change. Rows are append-only: once written they are
/// never updated or deleted (compliance record).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyEvent {
    pub id: i64,
    #[serde(skip_serializing)]
    pub log_id: i64,
    pub status: DutyStatus,
    pub time: DateTime<Utc>,
    pub location: Option<String>,
    pub odometer: Option<f64>,
    pub engine_hours: Option<f64>,
    pub device_id: Option<String>,
    pub client_event_id: String,
    #[serde(skip_serializing)]
    pub created_at: String,
}

/// One incoming item of a sync batch, as produced by the client device.
///
/// `status` and `time` are required but modeled as options: a malformed item
/// is dropped from the batch instead of failing the whole call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub client_event_id: Option<String>,
    pub status: Option<DutyStatus>,
    pub time: Option<DateTime<Utc>>,
    pub log_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub odometer: Option<f64>,
    pub engine_hours: Option<f64>,
    pub device_id: Option<String>,
}

impl EventInput {
    /// The date group this item belongs to: explicit `logDate` wins,
    /// otherwise the UTC calendar date of the event time.
    pub fn group_date(&self) -> Option<NaiveDate> {
        self.log_date.or_else(|| self.time.map(|t| t.date_naive()))
    }
}
