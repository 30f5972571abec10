use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;
mod view;

#[derive(Parser)]
#[command(name = "spinwheel", version, about = "Reward / penalty selection wheel")]
pub struct Cli {
    /// Config file to use instead of ~/.config/spinwheel/config.toml
    #[arg(long, global = true, env = "SPINWHEEL_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive wheel session
    Play(commands::play::PlayArgs),
    /// Spin once and print the result
    Spin(commands::spin::SpinArgs),
    /// Resolve a rotation angle to a segment index
    Resolve(commands::resolve::ResolveArgs),
    /// Show the configured item lists
    Items(commands::items::ItemsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPINWHEEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config_path = cli.config;
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args, config_path.as_deref()),
        Commands::Spin(args) => commands::spin::run(args, config_path.as_deref()),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Items(args) => commands::items::run(args, config_path.as_deref()),
        Commands::Config { action } => commands::config::run(action, config_path.as_deref()),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
