//! Configuration loading traits and types.
//!
//! One TOML file describes a run: `[shared]` logging/identity,
//! `[controller]` thresholds, timings and strategy, `[arena]` for the
//! simulated platform. Every table is optional.
//!
//! # Usage
//!
//! ```rust,no_run
//! use sumo_common::config::{load_config, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = load_config(Path::new("config/sumo.toml"))?;
//!     println!("Profile: {}", config.controller.profile.name());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::arena::ArenaConfig;
use crate::control::ControllerConfig;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, per-cycle decisions.
    Trace,
    /// State transitions and maneuvers.
    Debug,
    /// Startup, attacks and shutdown.
    #[default]
    Info,
    /// Sensor and actuator faults.
    Warn,
    /// Fatal problems only.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common fields (`[shared]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Robot instance identifier, shows up in logs.
    #[serde(default = "default_robot_name")]
    pub robot_name: String,
}

fn default_robot_name() -> String {
    "sumobot".to_string()
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            robot_name: default_robot_name(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `robot_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.robot_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "robot_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SumoConfig {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

impl SumoConfig {
    /// Parse and validate from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections, then the rules that span sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.controller
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("controller: {e}")))?;
        self.arena
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("arena: {e}")))?;

        // Attack threshold must lie within sonar range.
        let range = self.arena.robot.sonar_range_cm;
        if self.controller.attack_distance_cm > range {
            return Err(ConfigError::ValidationError(format!(
                "controller.attack_distance_cm ({}) exceeds arena.robot.sonar_range_cm ({range})",
                self.controller.attack_distance_cm
            )));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation: any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Load and validate a [`SumoConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<SumoConfig, ConfigError> {
    let config = SumoConfig::load(path)?;
    config.validate()?;
    Ok(config)
}
