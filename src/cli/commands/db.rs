use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migrations completed.");
        }

        if *show_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *check {
            info("Running integrity checks…");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity != "ok" {
                warning(format!("SQLite integrity check failed: {integrity}"));
                return Ok(());
            }

            // Domain invariants: one log per driver/date, one sample per
            // log/hour, globally unique client event ids. The UNIQUE
            // constraints enforce these going forward; this flags rows that
            // predate them.
            let dup_logs: i64 = pool.conn.query_row(
                "SELECT COUNT(*) FROM (
                     SELECT 1 FROM daily_logs GROUP BY driver_id, log_date HAVING COUNT(*) > 1
                 )",
                [],
                |row| row.get(0),
            )?;
            let dup_samples: i64 = pool.conn.query_row(
                "SELECT COUNT(*) FROM (
                     SELECT 1 FROM hourly_samples GROUP BY log_id, hour HAVING COUNT(*) > 1
                 )",
                [],
                |row| row.get(0),
            )?;
            let dup_events: i64 = pool.conn.query_row(
                "SELECT COUNT(*) FROM (
                     SELECT 1 FROM duty_events GROUP BY client_event_id HAVING COUNT(*) > 1
                 )",
                [],
                |row| row.get(0),
            )?;

            if dup_logs + dup_samples + dup_events == 0 {
                success("Integrity check passed.");
            } else {
                warning(format!(
                    "Uniqueness violations: {dup_logs} duplicate logs, \
                     {dup_samples} duplicate samples, {dup_events} duplicate event ids"
                ));
            }
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
