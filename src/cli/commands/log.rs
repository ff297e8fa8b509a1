use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::oplog_view::OplogView;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let mut pool = DbPool::new(&cfg.database)?;
        OplogView::print_log(&mut pool, cfg)?;
    }

    Ok(())
}
