//! Configuration for the chat screen.
//!
//! Stored as JSON. Every field has a default, so a partial file (or no
//! file at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::placeholder::PlaceholderConfig;

/// Main configuration for parley.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name shown in the header.
    #[serde(default = "default_contact_name")]
    pub contact_name: String,

    /// Initials shown in avatar badges.
    #[serde(default = "default_contact_initials")]
    pub contact_initials: String,

    /// Composer placeholder animation.
    #[serde(default)]
    pub placeholder: PlaceholderConfig,

    /// Delay between a send and the scroll to the newest message.
    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,

    /// Event loop tick rate.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// JSON file with the seed conversation. The built-in one is used when
    /// unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

fn default_contact_name() -> String {
    "MakerTodd".into()
}

fn default_contact_initials() -> String {
    "MT".into()
}

fn default_scroll_delay_ms() -> u64 {
    100
}

fn default_tick_rate_ms() -> u64 {
    25
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contact_name: default_contact_name(),
            contact_initials: default_contact_initials(),
            placeholder: PlaceholderConfig::default(),
            scroll_delay_ms: default_scroll_delay_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            seed_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check values serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder.prompts.is_empty() {
            return Err(ConfigError::Invalid(
                "placeholder.prompts must not be empty".into(),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Parsed, but not usable.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
