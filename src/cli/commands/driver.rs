use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{find_driver_by_username, insert_driver, list_drivers};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Driver {
        add,
        first_name,
        last_name,
        list,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(username) = add {
            if username.trim().is_empty() {
                return Err(AppError::Validation("username must not be empty".into()));
            }
            if find_driver_by_username(&pool.conn, username)?.is_some() {
                return Err(AppError::Validation(format!(
                    "driver '{username}' already exists"
                )));
            }

            insert_driver(
                &pool.conn,
                username,
                first_name.as_deref().unwrap_or(""),
                last_name.as_deref().unwrap_or(""),
            )?;
            oplog(&pool.conn, "driver", username, "Driver registered")?;

            success(format!("Driver '{username}' registered."));
        }

        if *list {
            let drivers = list_drivers(&pool.conn)?;

            if drivers.is_empty() {
                println!("No drivers registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column {
                    header: "ID".into(),
                    width: 4,
                },
                Column {
                    header: "USERNAME".into(),
                    width: 12,
                },
                Column {
                    header: "NAME".into(),
                    width: 20,
                },
            ]);

            for d in &drivers {
                table.add_row(vec![
                    d.id.to_string(),
                    d.username.clone(),
                    format!("{} {}", d.first_name, d.last_name).trim().to_string(),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
