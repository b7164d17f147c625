//! Configuration module for Jasmine
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`JASMINE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use jasmine::config::JasmineConfig;
//!
//! // Load defaults
//! let config = JasmineConfig::default();
//! assert_eq!(config.logging.level, "info");
//!
//! // Parse from TOML
//! let toml = r#"
//! [message]
//! indent_json = true
//! "#;
//! let config: JasmineConfig = toml::from_str(toml).unwrap();
//! assert!(config.message.indent_json);
//! ```

pub mod error;
pub mod logging;
pub mod message;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use message::MessageConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Example configuration written by `jasmine config init`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../jasmine.example.toml");

/// Unified configuration for the Jasmine CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JasmineConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Message defaults
    pub message: MessageConfig,
}

impl JasmineConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                tracing::debug!(path = %p.display(), "Loading configuration file");
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports JASMINE_* environment variables.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("JASMINE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("JASMINE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(indent) = std::env::var("JASMINE_INDENT_JSON") {
            if let Ok(b) = indent.to_lowercase().parse() {
                self.message.indent_json = b;
            }
        }
        if let Ok(timestamp) = std::env::var("JASMINE_TIMESTAMP") {
            if let Ok(b) = timestamp.to_lowercase().parse() {
                self.message.timestamp = b;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !logging::is_valid_level(&self.logging.level) {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                message: format!(
                    "unknown level '{}', expected one of: {}",
                    self.logging.level,
                    logging::LOG_LEVELS.join(", ")
                ),
            });
        }

        if let Some(levels) = &self.logging.component_levels {
            for (component, level) in levels {
                if component.is_empty() {
                    return Err(ConfigError::Validation {
                        field: "logging.component_levels".to_string(),
                        message: "component name cannot be empty".to_string(),
                    });
                }
                if !logging::is_valid_level(level) {
                    return Err(ConfigError::Validation {
                        field: format!("logging.component_levels.{}", component),
                        message: format!("unknown level '{}'", level),
                    });
                }
            }
        }

        Ok(())
    }
}
