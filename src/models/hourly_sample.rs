use super::duty_status::DutyStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Derived occupancy of one hour slot of a daily log.
///
/// Samples are a disposable cache: the whole set for a log is recomputed
/// from the current event set after every ingestion touching that log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySample {
    /// Hour slot 0..=23.
    pub hour: u32,
    /// Start of coverage, clipped to the hour slot.
    pub start_time: DateTime<Utc>,
    /// End of coverage, clipped to the hour slot.
    pub end_time: DateTime<Utc>,
    pub status: DutyStatus,
    /// The event this slot's status was taken from.
    pub event_id: Option<i64>,
    pub odometer: Option<f64>,
    pub engine_hours: Option<f64>,
    pub location: Option<String>,
}
