//! Read assembly: join a day's log row, events, hourly samples and a
//! freshly computed summary into one view per day.

use crate::core::summary;
use crate::db::pool::DbPool;
use crate::db::queries::{
    find_driver_by_username, load_events_by_log, load_logs_for_driver_since, load_samples_by_log,
};
use crate::errors::AppResult;
use crate::models::log_view::DayLogView;
use crate::utils::date;
use chrono::Duration;

pub struct QueryLogic;

impl QueryLogic {
    /// Views for the calendar dates `[today-(days-1), today]`, newest first.
    ///
    /// An unknown driver yields an empty list, matching the read side's
    /// lenient contract (only writes require the driver to resolve).
    pub fn fetch(pool: &mut DbPool, username: &str, days: i64) -> AppResult<Vec<DayLogView>> {
        let conn = &pool.conn;

        let Some(driver) = find_driver_by_username(conn, username)? else {
            return Ok(Vec::new());
        };

        let days = days.max(1);
        let since = date::today_utc() - Duration::days(days - 1);

        let logs = load_logs_for_driver_since(conn, driver.id, since)?;

        let mut views = Vec::with_capacity(logs.len());
        for log in logs {
            let events = load_events_by_log(conn, log.id)?;
            let hourly_samples = load_samples_by_log(conn, log.id)?;
            let summary = summary::summarize(&events);

            views.push(DayLogView {
                date: log.log_date,
                metadata: log.metadata,
                certified: log.certified,
                certified_at: log.certified_at,
                certified_by: log.certified_by,
                signature: log.signature,
                events,
                hourly_samples,
                summary,
            });
        }

        Ok(views)
    }
}
