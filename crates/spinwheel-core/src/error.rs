//! Core error types for spinwheel-core.
//!
//! Every command on the wheel is a synchronous precondition check. Failures
//! come back as [`WheelError`] and leave state untouched; the caller decides
//! how to surface them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for spinwheel-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Wheel command rejected
    #[error("Wheel error: {0}")]
    Wheel(#[from] WheelError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejections returned by the item store and the spin engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WheelError {
    /// Operation attempted in the wrong spin state
    #[error("cannot {operation} while the wheel is {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    /// Item text was empty after trimming
    #[error("item text is empty")]
    EmptyInput,

    /// Item text exceeds the length limit
    #[error("item text is {len} characters long (limit is {max})")]
    TooLong { len: usize, max: usize },

    /// Item already present in the list
    #[error("item '{0}' already exists")]
    Duplicate(String),

    /// No item at the given position
    #[error("index {index} out of range for a list of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Removing would leave the list empty
    #[error("at least one item must remain in the list")]
    MinimumSizeViolation,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
