//! Per-day duty-category totals derived from the ordered event set.

use crate::models::day_summary::DaySummary;
use crate::models::duty_event::DutyEvent;
use crate::models::duty_status::DutyStatus;

/// Fixed cycle figure reported until the rolling 7/8-day computation is
/// implemented.
pub const CYCLE_HOURS: f64 = 70.0;

fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Sum the intervals between consecutive events into drive/break/on-duty
/// buckets, keyed by the status of the *earlier* event of each pair.
///
/// The interval from the last event to end-of-day is intentionally not
/// counted; the day's tail stays open until the next status change arrives.
pub fn summarize(events: &[DutyEvent]) -> DaySummary {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| (e.time, e.id));

    let mut drive = 0.0;
    let mut break_time = 0.0;
    let mut shift = 0.0;
    let mut last_status = DutyStatus::OffDuty;

    for pair in sorted.windows(2) {
        let curr = &pair[0];
        let next = &pair[1];

        let hours = (next.time - curr.time).num_milliseconds() as f64 / 3_600_000.0;

        match curr.status {
            DutyStatus::Driving => drive += hours,
            DutyStatus::OffDuty | DutyStatus::Sleeper => break_time += hours,
            DutyStatus::OnDuty => shift += hours,
        }

        last_status = curr.status;
    }

    let vehicle = sorted.last().and_then(|e| e.device_id.clone());

    DaySummary {
        drive: round2(drive),
        break_time: round2(break_time),
        shift: round2(shift),
        cycle: CYCLE_HOURS,
        last_status,
        vehicle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ev(id: i64, status: DutyStatus, rfc3339: &str, device: Option<&str>) -> DutyEvent {
        DutyEvent {
            id,
            log_id: 1,
            status,
            time: DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
            location: None,
            odometer: None,
            engine_hours: None,
            device_id: device.map(String::from),
            client_event_id: format!("ev-{id}"),
            created_at: String::new(),
        }
    }

    #[test]
    fn empty_set_gives_defaults() {
        let s = summarize(&[]);
        assert_eq!(s, DaySummary::default());
        assert_eq!(s.cycle, CYCLE_HOURS);
    }

    #[test]
    fn trailing_interval_is_not_counted() {
        let events = vec![
            ev(1, DutyStatus::Driving, "2024-01-01T00:00:00Z", None),
            ev(2, DutyStatus::OnDuty, "2024-01-01T02:00:00Z", None),
        ];
        let s = summarize(&events);

        assert_eq!(s.drive, 2.00);
        // ON_DUTY-to-end-of-day is left open.
        assert_eq!(s.shift, 0.00);
        assert_eq!(s.last_status, DutyStatus::Driving);
    }

    #[test]
    fn buckets_follow_the_earlier_status() {
        let events = vec![
            ev(1, DutyStatus::OffDuty, "2024-01-01T00:00:00Z", None),
            ev(2, DutyStatus::Driving, "2024-01-01T08:00:00Z", Some("ELD-7")),
            ev(3, DutyStatus::OnDuty, "2024-01-01T12:00:00Z", Some("ELD-7")),
        ];
        let s = summarize(&events);

        assert_eq!(s.break_time, 8.00);
        assert_eq!(s.drive, 4.00);
        assert_eq!(s.shift, 0.00);
        assert_eq!(s.last_status, DutyStatus::Driving);
        assert_eq!(s.vehicle.as_deref(), Some("ELD-7"));
    }

    #[test]
    fn fractional_hours_round_to_two_decimals() {
        // 100 minutes of driving = 1.666... hours.
        let events = vec![
            ev(1, DutyStatus::Driving, "2024-01-01T00:00:00Z", None),
            ev(2, DutyStatus::OffDuty, "2024-01-01T01:40:00Z", None),
            ev(3, DutyStatus::OffDuty, "2024-01-01T02:00:00Z", None),
        ];
        let s = summarize(&events);

        assert_eq!(s.drive, 1.67);
        assert_eq!(s.break_time, 0.33);
    }

    #[test]
    fn single_event_keeps_default_last_status() {
        let events = vec![ev(1, DutyStatus::Driving, "2024-01-01T06:00:00Z", None)];
        let s = summarize(&events);

        assert_eq!(s.drive, 0.0);
        assert_eq!(s.last_status, DutyStatus::OffDuty);
    }

    #[test]
    fn vehicle_comes_from_the_last_event() {
        let events = vec![
            ev(1, DutyStatus::OffDuty, "2024-01-01T00:00:00Z", Some("ELD-1")),
            ev(2, DutyStatus::Driving, "2024-01-01T03:00:00Z", None),
        ];
        assert_eq!(summarize(&events).vehicle, None);
    }
}
