use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ingest::IngestLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::duty_event::EventInput;
use crate::ui::messages::{success, warning};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { driver, file } = cmd {
        let raw = fs::read_to_string(file)?;
        let items: Vec<EventInput> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Validation(format!("invalid event batch: {e}")))?;

        let mut pool = DbPool::with_busy_timeout(&cfg.database, cfg.busy_timeout_ms)?;

        let outcome = IngestLogic::apply(&mut pool, cfg, driver, &items)?;

        success(format!(
            "Synced {} events for {}.",
            outcome.saved_client_event_ids.len(),
            driver
        ));
        if outcome.dropped > 0 {
            warning(format!("{} malformed events dropped.", outcome.dropped));
        }

        for id in &outcome.saved_client_event_ids {
            println!("saved: {id}");
        }
    }

    Ok(())
}
