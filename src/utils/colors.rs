/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::duty_status::DutyStatus;

/// Grid color per duty status: rest grey, driving green, on-duty yellow.
pub fn color_for_status(status: DutyStatus) -> &'static str {
    match status {
        DutyStatus::OffDuty => GREY,
        DutyStatus::Sleeper => BLUE,
        DutyStatus::Driving => GREEN,
        DutyStatus::OnDuty => YELLOW,
    }
}

/// Certification badge color.
pub fn color_for_certified(certified: bool) -> &'static str {
    if certified { GREEN } else { GREY }
}
