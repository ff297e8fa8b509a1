use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("{content}");
            } else {
                warning(format!("No config file found at {}", path.display()));
                info("Run `hoslog init` to create one.");
            }
        }

        if *check {
            // Re-serializing the loaded config fills missing fields with
            // their defaults.
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| crate::errors::AppError::Config(e.to_string()))?;

            let path = Config::config_file();
            if path.exists() {
                let on_disk = fs::read_to_string(&path)?;
                if on_disk == yaml {
                    success("Configuration file is up to date.");
                } else {
                    fs::write(&path, &yaml)?;
                    success("Configuration file completed with default values.");
                }
            } else {
                warning("No config file to check; using defaults.");
            }
        }
    }

    Ok(())
}
