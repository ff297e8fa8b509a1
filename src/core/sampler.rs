//! Derivation of the 24-slot hourly occupancy grid from a day's events.
//!
//! Pure: output depends only on the (events, log_date) pair. Events are
//! sorted up front, so insertion order never leaks into the result.

use crate::models::duty_event::DutyEvent;
use crate::models::hourly_sample::HourlySample;
use crate::utils::time::{day_start, hour_bounds};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Day coverage bounds: midnight up to 23:59:59.999 inclusive.
fn day_bounds(log_date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day_start(log_date);
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    (start, end)
}

/// Compute the hourly samples for a log's event set.
///
/// Each event covers `[its time, next event's time)`, the last one running
/// to end-of-day; coverage is clipped to the day's bounds. When several
/// statuses touch the same hour slot, the one with the highest precedence
/// wins (DRIVING > ON_DUTY > rest); ties keep the first-seen candidate, so
/// sub-hour transitions collapse into a single slot.
pub fn sample(events: &[DutyEvent], log_date: NaiveDate) -> Vec<HourlySample> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| (e.time, e.id));

    let (day_start, day_end) = day_bounds(log_date);

    let mut slots: BTreeMap<u32, HourlySample> = BTreeMap::new();

    for (i, ev) in sorted.iter().enumerate() {
        let raw_end = match sorted.get(i + 1) {
            Some(next) => next.time,
            None => day_end,
        };

        let start = ev.time.max(day_start);
        let end = raw_end.min(day_end);
        if end <= start {
            continue;
        }

        for hour in 0..24u32 {
            let (slot_start, slot_end) = hour_bounds(log_date, hour);

            let clipped_start = start.max(slot_start);
            let clipped_end = end.min(slot_end);
            if clipped_end <= clipped_start {
                continue;
            }

            let candidate = HourlySample {
                hour,
                start_time: clipped_start,
                end_time: clipped_end,
                status: ev.status,
                event_id: Some(ev.id),
                odometer: ev.odometer,
                engine_hours: ev.engine_hours,
                location: ev.location.clone(),
            };

            match slots.get(&hour) {
                Some(existing) if existing.status.precedence() >= ev.status.precedence() => {}
                _ => {
                    slots.insert(hour, candidate);
                }
            }
        }
    }

    slots.into_values().collect()
}
