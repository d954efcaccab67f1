//! Config command implementation.

use std::path::PathBuf;

use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::config::{default_config_path, Config};
use crate::error::{Result, WrappedError};

/// Run the config command.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let path = config_path(cli)?;

    match &args.action {
        ConfigAction::Show => {
            let config = load(&path)?;
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| WrappedError::InvalidConfig {
                    message: format!("Failed to serialize config: {e}"),
                })?;
            print!("{rendered}");
        }
        ConfigAction::Get { key } => {
            let config = load(&path)?;
            println!("{}", config.get(key)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = load(&path)?;
            config.set(key, value)?;
            config.save_to(&path)?;
            if !cli.quiet {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(WrappedError::ConfigError {
                    message: format!("configuration already exists at {}", path.display()),
                });
            }
            Config::default().save_to(&path)?;
            if !cli.quiet {
                println!("Initialized configuration at {}", path.display());
            }
        }
        ConfigAction::Reset => {
            Config::default().save_to(&path)?;
            if !cli.quiet {
                println!("Configuration reset to defaults at {}", path.display());
            }
        }
    }

    Ok(())
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

fn load(path: &PathBuf) -> Result<Config> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}
