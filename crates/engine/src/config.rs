//! Engine configuration, loadable from YAML.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! standard behavior: two blocks of border per level, a one block floor,
//! two second transitions, five blocks of grace and one point of damage.

use std::path::Path;
use std::time::Duration;

use levelborder_common::BorderMode;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a [`BorderConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    /// Aggregation mode the engine starts in.
    pub mode: BorderMode,
    /// Border size contributed by one experience level.
    pub blocks_per_level: f64,
    /// Smallest size a border may have.
    pub min_size: f64,
    /// Length of a size transition.
    pub transition_millis: u64,
    /// How far outside the border a player may stand before taking damage.
    pub damage_grace: f64,
    /// Damage per border check while beyond the grace margin.
    pub damage_amount: f32,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            mode: BorderMode::Own,
            blocks_per_level: 2.0,
            min_size: 1.0,
            transition_millis: 2000,
            damage_grace: 5.0,
            damage_amount: 1.0,
        }
    }
}

impl BorderConfig {
    pub fn with_mode(mode: BorderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.display(), mode = %config.mode, "loaded border config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if !self.blocks_per_level.is_finite() || self.blocks_per_level < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "blocks_per_level must be non-negative, got {}",
                self.blocks_per_level
            )));
        }
        if !self.damage_grace.is_finite() || self.damage_grace < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "damage_grace must be non-negative, got {}",
                self.damage_grace
            )));
        }
        if !self.damage_amount.is_finite() || self.damage_amount < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "damage_amount must be non-negative, got {}",
                self.damage_amount
            )));
        }
        Ok(())
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_millis)
    }

    /// Border size for a given amount of experience.
    pub fn size_for(&self, experience: i64) -> f64 {
        (experience as f64 * self.blocks_per_level).max(self.min_size)
    }
}
