use serde::{Deserialize, Serialize};

use crate::easing::CubicBezier;
use crate::error::ConfigError;

/// Tunable constants of a spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Degrees added to the rotation on every tick while free-spinning.
    #[serde(default = "default_tick_increment")]
    pub tick_increment_deg: f64,
    /// Lower bound (inclusive) of the extra full rotations added on stop.
    #[serde(default = "default_min_extra_spins")]
    pub min_extra_spins: f64,
    /// Upper bound (exclusive) of the extra full rotations added on stop.
    #[serde(default = "default_max_extra_spins")]
    pub max_extra_spins: f64,
    /// How long the eased slow-down lasts before the result is final.
    #[serde(default = "default_deceleration_ms")]
    pub deceleration_ms: u64,
    /// Fixed seed for the extra-spin draw. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub easing: CubicBezier,
}

fn default_tick_increment() -> f64 {
    15.0
}
fn default_min_extra_spins() -> f64 {
    5.0
}
fn default_max_extra_spins() -> f64 {
    10.0
}
fn default_deceleration_ms() -> u64 {
    2_000
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            tick_increment_deg: default_tick_increment(),
            min_extra_spins: default_min_extra_spins(),
            max_extra_spins: default_max_extra_spins(),
            deceleration_ms: default_deceleration_ms(),
            seed: None,
            easing: CubicBezier::default(),
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: format!("spin.{key}"),
            message: message.to_string(),
        };

        if !(self.tick_increment_deg > 0.0 && self.tick_increment_deg < 360.0) {
            return Err(invalid("tick_increment_deg", "must be in (0, 360)"));
        }
        if !(self.min_extra_spins >= 1.0) {
            return Err(invalid("min_extra_spins", "must be at least 1"));
        }
        if !(self.max_extra_spins > self.min_extra_spins) || !self.max_extra_spins.is_finite() {
            return Err(invalid(
                "max_extra_spins",
                "must be finite and greater than min_extra_spins",
            ));
        }
        if self.deceleration_ms == 0 {
            return Err(invalid("deceleration_ms", "must be greater than 0"));
        }
        if !self.easing.is_valid() {
            return Err(invalid("easing", "x control points must lie in [0, 1]"));
        }
        Ok(())
    }
}
