//! Engine configuration
//!
//! Layered with figment: built-in defaults, then `dicecalc.toml` (or an
//! explicit file), then `DICECALC_*` environment variables.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dice::{DISPLAY_THRESHOLD, MAX_EXPLOSIONS, MAX_POOL_DICE};

/// Config file read from the working directory when no path is given
pub const CONFIG_FILE: &str = "dicecalc.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "DICECALC_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("max_explosions must be at least 1")]
    NoExplosions,

    #[error("max_pool_dice must be at least 1")]
    NoPoolDice,

    #[error("display_threshold must be in [0, 1), got {0}")]
    DisplayThreshold(f64),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rerolls allowed in one explosion chain (default: 4)
    pub max_explosions: u32,
    /// Largest pool, extra dice included, evaluated on request (default: 13)
    pub max_pool_dice: u32,
    /// Smallest probability charted in a histogram (default: 0.005)
    pub display_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_explosions: MAX_EXPLOSIONS,
            max_pool_dice: MAX_POOL_DICE,
            display_threshold: DISPLAY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Provider chain for the given config file (or `dicecalc.toml`)
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate configuration
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        debug!(
            file = %path.unwrap_or_else(|| Path::new(CONFIG_FILE)).display(),
            max_explosions = config.max_explosions,
            max_pool_dice = config.max_pool_dice,
            "loaded configuration"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_explosions == 0 {
            return Err(ConfigError::NoExplosions);
        }
        if self.max_pool_dice == 0 {
            return Err(ConfigError::NoPoolDice);
        }
        if !(0.0..1.0).contains(&self.display_threshold) {
            return Err(ConfigError::DisplayThreshold(self.display_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_explosions, 4);
        assert_eq!(config.max_pool_dice, 13);
        assert_eq!(config.display_threshold, 0.005);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig {
            max_explosions: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoExplosions)));

        let config = EngineConfig {
            max_pool_dice: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoPoolDice)));

        let config = EngineConfig {
            display_threshold: 1.5,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DisplayThreshold(_))));
    }
}
