use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

/// Report for `db --info`: file stats, row counts, duty-status breakdown.
pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let count = |sql: &str| -> rusqlite::Result<i64> {
        pool.conn.query_row(sql, [], |row| row.get(0))
    };

    let drivers = count("SELECT COUNT(*) FROM drivers")?;
    let logs = count("SELECT COUNT(*) FROM daily_logs")?;
    let certified = count("SELECT COUNT(*) FROM daily_logs WHERE certified = 1")?;
    let events = count("SELECT COUNT(*) FROM duty_events")?;
    let samples = count("SELECT COUNT(*) FROM hourly_samples")?;

    println!("{}• Drivers:{} {}{}{}", CYAN, RESET, GREEN, drivers, RESET);
    println!(
        "{}• Daily logs:{} {}{}{} ({} certified)",
        CYAN, RESET, GREEN, logs, RESET, certified
    );
    println!(
        "{}• Duty events:{} {}{}{} ({} hourly samples)",
        CYAN, RESET, GREEN, events, RESET, samples
    );

    // Per-status event counts
    {
        let mut stmt = pool
            .conn
            .prepare("SELECT status, COUNT(*) FROM duty_events GROUP BY status ORDER BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut breakdown = Vec::new();
        for r in rows {
            breakdown.push(r?);
        }

        if !breakdown.is_empty() {
            println!("{}• Events by status:{}", CYAN, RESET);
            for (status, n) in breakdown {
                println!("    {:<9} {}", status, n);
            }
        }
    }

    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT MIN(log_date) FROM daily_logs WHERE log_date IS NOT NULL",
            [],
            |row| row.get(0),
        )
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(log_date) FROM daily_logs", [], |row| row.get(0))
        .optional()?
        .flatten();

    println!("{}• Date range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first_date.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last_date.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    if let (Some(f), Some(l)) = (first_date, last_date) {
        let d1 = parse_date(&f)?;
        let d2 = parse_date(&l)?;
        let days = (d2 - d1).num_days().max(1);

        println!(
            "{}• Average events/day:{} {:.2}",
            CYAN,
            RESET,
            events as f64 / days as f64
        );
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
