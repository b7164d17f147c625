//! CLI error types

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid {flag} value '{value}': expected KEY=VALUE with a non-empty key")]
    InvalidPair { flag: &'static str, value: String },

    #[error("Invalid JSON for block '{label}': {source}")]
    InvalidJson {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("File already exists: {0}. Use --force to overwrite.")]
    FileExists(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),
}
