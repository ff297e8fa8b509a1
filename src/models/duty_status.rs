use serde::{Deserialize, Serialize};

/// Driver duty-status classification as recorded by the client device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyStatus {
    OffDuty,
    Sleeper,
    Driving,
    OnDuty,
}

impl Default for DutyStatus {
    fn default() -> Self {
        DutyStatus::OffDuty
    }
}

impl DutyStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF_DUTY",
            DutyStatus::Sleeper => "SLEEPER",
            DutyStatus::Driving => "DRIVING",
            DutyStatus::OnDuty => "ON_DUTY",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "OFF_DUTY" => Some(DutyStatus::OffDuty),
            "SLEEPER" => Some(DutyStatus::Sleeper),
            "DRIVING" => Some(DutyStatus::Driving),
            "ON_DUTY" => Some(DutyStatus::OnDuty),
            _ => None,
        }
    }

    /// Precedence when several statuses compete for the same hour slot.
    /// DRIVING beats ON_DUTY, which beats both rest statuses.
    pub fn precedence(&self) -> u8 {
        match self {
            DutyStatus::Driving => 3,
            DutyStatus::OnDuty => 2,
            DutyStatus::OffDuty | DutyStatus::Sleeper => 1,
        }
    }

    /// Single-letter code used by the terminal grid view.
    pub fn grid_code(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "F",
            DutyStatus::Sleeper => "S",
            DutyStatus::Driving => "D",
            DutyStatus::OnDuty => "N",
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::Sleeper)
    }
}
