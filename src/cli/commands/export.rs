use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        driver,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let out = expand_tilde(file);
        let mut pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(
            &mut pool,
            format.clone(),
            &out.to_string_lossy(),
            driver,
            range,
            *force,
        )?;
    }

    Ok(())
}
