use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::QueryLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::log_view::DayLogView;
use crate::utils::colors::{GREY, RESET, color_for_certified, color_for_status};
use crate::utils::time::format_hours;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logs {
        driver,
        days,
        json,
        events,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let days = days.unwrap_or(cfg.default_days);

        let views = QueryLogic::fetch(&mut pool, driver, days)?;

        if *json {
            let out = serde_json::to_string_pretty(&views)
                .map_err(|e| AppError::Other(format!("JSON encoding failed: {e}")))?;
            println!("{out}");
            return Ok(());
        }

        if views.is_empty() {
            println!("No logs for {} in the last {} days.", driver, days);
            return Ok(());
        }

        for view in &views {
            print_day(view, *events);
        }
    }

    Ok(())
}

fn print_day(view: &DayLogView, with_events: bool) {
    println!("\n=== {} ===", view.date);

    let badge_color = color_for_certified(view.certified);
    if view.certified {
        println!(
            "{}CERTIFIED{} by {} at {}",
            badge_color,
            RESET,
            view.certified_by.as_deref().unwrap_or("driver"),
            view.certified_at.as_deref().unwrap_or("-")
        );
    } else {
        println!("{}uncertified{}", badge_color, RESET);
    }

    // Hour header + status strip
    let mut header = String::from("  ");
    let mut strip = String::from("  ");
    for hour in 0..24u32 {
        header.push_str(&format!("{:>2} ", hour));

        match view.hourly_samples.iter().find(|s| s.hour == hour) {
            Some(s) => {
                strip.push_str(&format!(
                    "{}{:>2}{} ",
                    color_for_status(s.status),
                    s.status.grid_code(),
                    RESET
                ));
            }
            None => strip.push_str(&format!("{} .{} ", GREY, RESET)),
        }
    }
    println!("{header}");
    println!("{strip}");

    let s = &view.summary;
    println!(
        "Drive {} | Break {} | On-duty {} | Cycle {} | Last: {} | Vehicle: {}",
        format_hours(s.drive),
        format_hours(s.break_time),
        format_hours(s.shift),
        format_hours(s.cycle),
        s.last_status.to_db_str(),
        s.vehicle.as_deref().unwrap_or("-"),
    );

    if with_events {
        if view.events.is_empty() {
            println!("No events.");
        } else {
            println!("Events:");
            for ev in &view.events {
                println!(
                    "- {} | {:<8} | loc={} | odo={} | id={}",
                    ev.time.to_rfc3339(),
                    ev.status.to_db_str(),
                    ev.location.as_deref().unwrap_or("-"),
                    ev.odometer.map(|v| v.to_string()).unwrap_or_else(|| "-".into()),
                    ev.client_event_id,
                );
            }
        }
    }
}
