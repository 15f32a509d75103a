//! Configuration types for statistics objects

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use vigil_stats::{TimeUnit, UNNAMED};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Empty interval name
    #[error("interval names must not be empty")]
    EmptyInterval,

    /// Interval listed twice
    #[error("interval {0} configured more than once")]
    DuplicateInterval(String),
}

/// Statistics object configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Display name of the statistics object
    #[serde(default = "default_name")]
    pub name: String,
    /// Interval names values are tracked for
    #[serde(default = "default_intervals")]
    pub intervals: Vec<String>,
    /// Unit used when rendering without an explicit unit
    #[serde(default)]
    pub default_unit: TimeUnit,
}

fn default_name() -> String {
    UNNAMED.to_string()
}

fn default_intervals() -> Vec<String> {
    vec!["1m".to_string(), "5m".to_string(), "1h".to_string()]
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            intervals: default_intervals(),
            default_unit: TimeUnit::default(),
        }
    }
}

impl StatsConfig {
    /// Default configuration with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: StatsConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check interval names are non-empty and unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for interval in &self.intervals {
            if interval.trim().is_empty() {
                return Err(ConfigError::EmptyInterval);
            }
            if !seen.insert(interval.as_str()) {
                return Err(ConfigError::DuplicateInterval(interval.clone()));
            }
        }
        Ok(())
    }
}
