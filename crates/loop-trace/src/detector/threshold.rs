//! Threshold configuration for the flood signal.
//!
//! Loads threshold policies from TOML and computes the effective cutoff
//! for a given average MAC count.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::config::{DEFAULT_THRESHOLD_FLOOR, DEFAULT_THRESHOLD_MULTIPLIER};
use crate::utils::error::ThresholdError;

/// Flood threshold configuration
///
/// ```toml
/// multiplier = 2.0
/// floor = 10
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ThresholdConfig {
    /// Dynamic threshold = average MACs per key times this
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Effective threshold never drops below this
    #[serde(default = "default_floor")]
    pub floor: f64,
}

fn default_multiplier() -> f64 {
    DEFAULT_THRESHOLD_MULTIPLIER
}

fn default_floor() -> f64 {
    DEFAULT_THRESHOLD_FLOOR
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_THRESHOLD_MULTIPLIER,
            floor: DEFAULT_THRESHOLD_FLOOR,
        }
    }
}

impl ThresholdConfig {
    /// Reject values that would make every or no key a flood
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(ThresholdError::Invalid(format!(
                "multiplier must be a positive number, got {}",
                self.multiplier
            )));
        }

        if !self.floor.is_finite() || self.floor < 0.0 {
            return Err(ThresholdError::Invalid(format!(
                "floor must be zero or positive, got {}",
                self.floor
            )));
        }

        Ok(())
    }
}

/// Load thresholds from a TOML file
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Errors
/// * `ThresholdError::IoError` - If file cannot be read
/// * `ThresholdError::ParseFailed` - If TOML is invalid
/// * `ThresholdError::Invalid` - If a value is out of range
///
/// # Example
/// ```ignore
/// let thresholds = load_thresholds("thresholds.toml")?;
/// ```
pub fn load_thresholds(path: impl AsRef<Path>) -> Result<ThresholdConfig, ThresholdError> {
    let contents = fs::read_to_string(path)?;
    let config: ThresholdConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Compute (dynamic, effective) thresholds for an average MAC count
pub fn effective_threshold(average_macs_per_key: f64, config: &ThresholdConfig) -> (f64, f64) {
    let dynamic = average_macs_per_key * config.multiplier;
    (dynamic, dynamic.max(config.floor))
}
