use super::duty_status::DutyStatus;
use serde::Serialize;

/// Per-day duty-category totals, in fractional hours rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub drive: f64,
    #[serde(rename = "break")]
    pub break_time: f64,
    pub shift: f64,
    pub cycle: f64,
    pub last_status: DutyStatus,
    pub vehicle: Option<String>,
}

impl Default for DaySummary {
    fn default() -> Self {
        Self {
            drive: 0.0,
            break_time: 0.0,
            shift: 0.0,
            cycle: crate::core::summary::CYCLE_HOURS,
            last_status: DutyStatus::OffDuty,
            vehicle: None,
        }
    }
}
