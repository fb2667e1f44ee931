//! Configuration management for polls

use crate::error::{PollsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PollsConfig {
    /// Public listing settings
    pub index: IndexConfig,
    /// Text validation settings
    pub validation: ValidationConfig,
    /// Output settings
    pub display: DisplayConfig,
}

impl PollsConfig {
    /// Load configuration from a TOML file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| e.with_context(format!("Failed to load {}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PollsError::Toml(e.to_string()))
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PollsError::Toml(e.to_string()))
    }

    /// Check that values are usable
    pub fn validate(&self) -> Result<()> {
        if self.index.latest_limit == Some(0) {
            return Err(PollsError::Config(
                "index.latest_limit must be at least 1".to_string(),
            ));
        }
        if self.validation.max_question_length == 0 || self.validation.max_choice_length == 0 {
            return Err(PollsError::Config(
                "validation lengths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Public listing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Cap on the questions shown by the index; unset shows every published one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_limit: Option<usize>,
}

/// Text validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum question text length in characters
    pub max_question_length: usize,
    /// Maximum choice text length in characters
    pub max_choice_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_question_length: 200,
            max_choice_length: 200,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime-style format for publication dates
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}
