//! TOML-based application configuration.
//!
//! Holds the spin tunables and the item lists a session starts with:
//!
//! ```toml
//! [spin]
//! tick_increment_deg = 15.0
//! min_extra_spins = 5.0
//! max_extra_spins = 10.0
//! deceleration_ms = 2000
//!
//! [items]
//! reward = ["과자 1개", "박수 받기", "청소 면제"]
//! penalty = ["노래부르기", "춤추기", "애교 10번", "스쿼드 30개"]
//! ```
//!
//! Configuration is stored at `~/.config/spinwheel/config.toml`. Item edits
//! made while playing live only in the session and are never written here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::items::{default_texts, parse_list, Mode};
use crate::spin::SpinConfig;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SPINWHEEL_CONFIG";

/// Initial item lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsConfig {
    #[serde(default = "default_reward")]
    pub reward: Vec<String>,
    #[serde(default = "default_penalty")]
    pub penalty: Vec<String>,
}

fn default_reward() -> Vec<String> {
    default_texts(Mode::Reward)
}
fn default_penalty() -> Vec<String> {
    default_texts(Mode::Penalty)
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            reward: default_reward(),
            penalty: default_penalty(),
        }
    }
}

impl ItemsConfig {
    pub fn list(&self, mode: Mode) -> &[String] {
        match mode {
            Mode::Reward => &self.reward,
            Mode::Penalty => &self.penalty,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub items: ItemsConfig,
}

/// Returns `~/.config/spinwheel[-dev]/` based on SPINWHEEL_ENV.
///
/// Set SPINWHEEL_ENV=dev to use the development directory.
pub fn data_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SPINWHEEL_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("spinwheel-dev")
    } else {
        base_dir.join("spinwheel")
    }
}

impl Config {
    /// Config file location: `SPINWHEEL_CONFIG` if set, else the data dir.
    pub fn path() -> PathBuf {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => data_dir().join("config.toml"),
        }
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Check tunables and item lists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spin.validate()?;
        for mode in Mode::ALL {
            parse_list(self.items.list(mode)).map_err(|e| ConfigError::InvalidValue {
                key: format!("items.{mode}"),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => Some("none".to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the existing type.
    ///
    /// The updated configuration is validated before it replaces `self`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if key.is_empty() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Null => match value {
                    "none" | "null" | "" => serde_json::Value::Null,
                    _ => serde_json::from_str(value)
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                },
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                serde_json::Value::String(_) => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}
