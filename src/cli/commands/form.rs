use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::metadata::MetadataLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use serde_json::{Map, Value};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Form {
        driver,
        date,
        file,
        set,
    } = cmd
    {
        let log_date =
            parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

        let mut form: Map<String, Value> = Map::new();

        if let Some(path) = file {
            let raw = fs::read_to_string(path)?;
            let from_file: Map<String, Value> = serde_json::from_str(&raw)
                .map_err(|e| AppError::InvalidMetadata(format!("{path}: {e}")))?;
            form.extend(from_file);
        }

        for pair in set {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                AppError::Validation(format!("--set expects KEY=VALUE, got '{pair}'"))
            })?;
            form.insert(key.to_string(), Value::String(value.to_string()));
        }

        if form.is_empty() {
            return Err(AppError::Validation(
                "nothing to submit: use --file or --set".into(),
            ));
        }

        let mut pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;
        MetadataLogic::apply(&mut pool, driver, log_date, &form)?;

        success(format!(
            "Saved {} form fields for {} on {}.",
            form.len(),
            driver,
            log_date
        ));
    }

    Ok(())
}
