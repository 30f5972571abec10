use std::path::Path;

use clap::Subcommand;
use spinwheel_core::Config;

use crate::common::{config_path, load_config, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "spin.deceleration_ms", "items.reward")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value (JSON array for item lists)
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, path: Option<&Path>) -> CliResult {
    let file = config_path(path);
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(path)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(path)?;
            config.set(&key, &value)?;
            config.save_to(&file)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = load_config(path)?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save_to(&file)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => println!("{}", file.display()),
    }
    Ok(())
}
