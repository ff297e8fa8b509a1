//! Daily-log certification: attach a signature and certifier to a day.

use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{get_or_create_daily_log, require_driver, set_certification};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rusqlite::TransactionBehavior;

pub struct CertifyLogic;

impl CertifyLogic {
    /// Certify the (driver, date) log, creating the row when absent.
    ///
    /// Repeated calls always succeed and leave the latest signature,
    /// certifier and timestamp in place; earlier certifications are
    /// overwritten without history.
    pub fn apply(
        pool: &mut DbPool,
        username: &str,
        log_date: NaiveDate,
        signature: &[u8],
        certifier_name: Option<&str>,
    ) -> AppResult<()> {
        if signature.is_empty() {
            return Err(AppError::Validation("signature must not be empty".into()));
        }

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let driver = require_driver(&tx, username)?;
        let log = get_or_create_daily_log(&tx, driver.id, log_date)?;
        set_certification(&tx, log.id, signature, certifier_name)?;

        oplog(
            &tx,
            "certify",
            username,
            &format!(
                "Log {} certified by {}",
                log_date,
                certifier_name.unwrap_or("driver")
            ),
        )?;

        tx.commit()?;
        Ok(())
    }
}
