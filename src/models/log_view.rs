use super::day_summary::DaySummary;
use super::duty_event::DutyEvent;
use super::hourly_sample::HourlySample;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

/// Fully assembled view of one day's log: metadata, certification state,
/// the ordered event list, the hourly grid, and the computed summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLogView {
    pub date: NaiveDate,
    pub metadata: Map<String, Value>,
    pub certified: bool,
    pub certified_at: Option<String>,
    pub certified_by: Option<String>,
    pub signature: Option<Vec<u8>>,
    pub events: Vec<DutyEvent>,
    pub hourly_samples: Vec<HourlySample>,
    pub summary: DaySummary,
}
