//! Batch ingestion of duty-status events.
//!
//! One call = one atomic unit of work: every date group a batch touches is
//! written (or rolled back) together. The transaction is opened in immediate
//! mode so concurrent submissions for the same database serialize on the
//! write lock before the get-or-create of the daily log runs.

use crate::config::Config;
use crate::core::sampler;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    NewDutyEvent, event_exists_by_client_id, get_or_create_daily_log, insert_duty_event,
    load_events_by_log, replace_hourly_samples, require_driver,
};
use crate::errors::{AppError, AppResult};
use crate::models::duty_event::EventInput;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use rusqlite::TransactionBehavior;
use std::collections::BTreeMap;

pub struct IngestLogic;

#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Client event ids accepted by this call, including re-submissions of
    /// already-stored events.
    pub saved_client_event_ids: Vec<String>,
    /// Items dropped by per-item validation.
    pub dropped: usize,
}

/// A uniqueness violation racing past the pre-check means another writer
/// stored the same client event id first: the event is already saved.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Validate one batch item. Returns the reason it must be dropped, if any.
fn validation_failure(item: &EventInput) -> Option<&'static str> {
    if item.time.is_none() {
        return Some("missing time");
    }
    if item.status.is_none() {
        return Some("missing status");
    }
    // A client-supplied idempotency key is what makes retries safe; an item
    // without one is malformed, never assigned a random key.
    if item
        .client_event_id
        .as_deref()
        .is_none_or(|id| id.is_empty())
    {
        return Some("missing clientEventId");
    }
    None
}

impl IngestLogic {
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        username: &str,
        items: &[EventInput],
    ) -> AppResult<IngestOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let driver = require_driver(&tx, username)?;

        // Group by explicit logDate, else the UTC calendar date of the
        // event time. Malformed items are dropped here, not the batch.
        let mut groups: BTreeMap<NaiveDate, Vec<&EventInput>> = BTreeMap::new();
        let mut dropped = 0usize;

        for item in items {
            if let Some(reason) = validation_failure(item) {
                warning(format!("Skipping malformed event ({reason})"));
                dropped += 1;
                continue;
            }
            let date = item
                .group_date()
                .expect("validated items always have a time");
            groups.entry(date).or_default().push(item);
        }

        let mut saved: Vec<String> = Vec::new();

        for (log_date, group) in &groups {
            let log = get_or_create_daily_log(&tx, driver.id, *log_date)?;

            if log.certified && cfg.rejects_certified_append() {
                // Dropping the transaction rolls back every group already
                // written by this call.
                return Err(AppError::CertifiedLog(log_date.to_string()));
            }

            for item in group {
                let client_event_id = item
                    .client_event_id
                    .as_deref()
                    .expect("validated items always have a client event id");

                if event_exists_by_client_id(&tx, client_event_id)? {
                    saved.push(client_event_id.to_string());
                    continue;
                }

                let new_event = NewDutyEvent {
                    log_id: log.id,
                    status: item.status.expect("validated"),
                    time: item.time.expect("validated"),
                    location: item.location.as_deref(),
                    odometer: item.odometer,
                    engine_hours: item.engine_hours,
                    device_id: item.device_id.as_deref(),
                    client_event_id,
                };

                match insert_duty_event(&tx, &new_event) {
                    Ok(_) => saved.push(client_event_id.to_string()),
                    Err(AppError::Db(ref e)) if is_unique_violation(e) => {
                        saved.push(client_event_id.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }

            // Rebuild the hourly grid from the log's full event set while
            // the unit of work still holds the lock.
            let events = load_events_by_log(&tx, log.id)?;
            let samples = sampler::sample(&events, *log_date);
            replace_hourly_samples(&tx, log.id, &samples)?;
        }

        oplog(
            &tx,
            "sync",
            username,
            &format!("{} events saved, {} dropped", saved.len(), dropped),
        )?;

        tx.commit()?;

        Ok(IngestOutcome {
            saved_client_event_ids: saved,
            dropped,
        })
    }
}
