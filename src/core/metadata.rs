//! Per-day form metadata: create-or-merge of the daily log's metadata map.

use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{get_or_create_daily_log, require_driver, update_log_metadata};
use crate::errors::AppResult;
use chrono::NaiveDate;
use rusqlite::TransactionBehavior;
use serde_json::{Map, Value};

pub struct MetadataLogic;

impl MetadataLogic {
    /// Merge `form` into the log's metadata by shallow top-level key
    /// replacement. Nested objects are replaced wholesale, never merged.
    pub fn apply(
        pool: &mut DbPool,
        username: &str,
        log_date: NaiveDate,
        form: &Map<String, Value>,
    ) -> AppResult<()> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let driver = require_driver(&tx, username)?;
        let mut log = get_or_create_daily_log(&tx, driver.id, log_date)?;

        for (key, value) in form {
            log.metadata.insert(key.clone(), value.clone());
        }
        update_log_metadata(&tx, log.id, &log.metadata)?;

        oplog(
            &tx,
            "form",
            username,
            &format!("Metadata updated for {} ({} keys)", log_date, form.len()),
        )?;

        tx.commit()?;
        Ok(())
    }
}
