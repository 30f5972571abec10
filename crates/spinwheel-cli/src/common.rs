//! Helpers shared by the subcommands.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use spinwheel_core::{Config, ConfigError, Mode};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Mode as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Reward,
    Penalty,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Reward => Mode::Reward,
            ModeArg::Penalty => Mode::Penalty,
        }
    }
}

pub fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf).unwrap_or_else(Config::path)
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    Config::load_from(&config_path(path))
}

/// Interval between display frames. Clamped to at least one millisecond.
pub fn frame_interval(fps: u32) -> Duration {
    let fps = fps.max(1) as u64;
    Duration::from_millis((1_000 / fps).max(1))
}
