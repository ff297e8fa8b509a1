use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::certify::CertifyLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Certify {
        driver,
        date,
        signature,
        sig_file,
        certifier,
    } = cmd
    {
        let log_date =
            parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

        let sig_bytes: Vec<u8> = match (signature, sig_file) {
            (Some(s), _) => s.as_bytes().to_vec(),
            (None, Some(path)) => fs::read(path)?,
            (None, None) => {
                return Err(AppError::Validation(
                    "a signature is required: use --signature or --sig-file".into(),
                ));
            }
        };

        let mut pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;
        CertifyLogic::apply(&mut pool, driver, log_date, &sig_bytes, certifier.as_deref())?;

        success(format!(
            "Log {} certified for {} by {}.",
            log_date,
            driver,
            certifier.as_deref().unwrap_or(driver)
        ));
    }

    Ok(())
}
