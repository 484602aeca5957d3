//! Service configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::Mark;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for a game service.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoughtsConfig {
    /// Mark played by the human (Cross or Nought). Cross always opens, so
    /// a human playing Nought faces an engine opening.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_human_mark() -> Mark {
    Mark::Cross
}

#[instrument]
fn default_log_filter() -> String {
    "info".to_string()
}

impl NoughtsConfig {
    /// Creates a configuration with the given seat assignment.
    #[instrument]
    pub fn new(human_mark: Mark) -> Result<Self, ConfigError> {
        let config = Self {
            human_mark,
            log_filter: default_log_filter(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Mark played by the engine.
    pub fn engine_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Whether the engine plays the opening move of every new game.
    pub fn engine_first(&self) -> bool {
        self.engine_mark() == Mark::Cross
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(human_mark = %config.human_mark, engine_first = config.engine_first(), "Config loaded successfully");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.human_mark.is_player() {
            return Err(ConfigError::new(
                "human_mark must be Cross or Nought".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for NoughtsConfig {
    fn default() -> Self {
        Self {
            human_mark: default_human_mark(),
            log_filter: default_log_filter(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
