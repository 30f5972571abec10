use std::path::Path;

use clap::Args;
use spinwheel_core::Mode;

use crate::common::{load_config, CliResult, ModeArg};

#[derive(Args)]
pub struct ItemsArgs {
    /// Only show this list
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ItemsArgs, config_path: Option<&Path>) -> CliResult {
    let config = load_config(config_path)?;
    let modes: Vec<Mode> = match args.mode {
        Some(mode) => vec![mode.into()],
        None => Mode::ALL.to_vec(),
    };

    if args.json {
        let mut out = serde_json::Map::new();
        for mode in &modes {
            out.insert(mode.to_string(), serde_json::json!(config.items.list(*mode)));
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for mode in modes {
        println!("{}:", mode.title());
        for (i, item) in config.items.list(mode).iter().enumerate() {
            println!("  {}. {item}", i + 1);
        }
    }
    Ok(())
}
