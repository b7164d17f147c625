//! CLI module for Jasmine
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `render` - Build one message from flags and print it
//! - `demo` - Log a sample login-failure message through tracing
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! jasmine render -d "login fail" -f retry=5 -e "sql connect err" --timestamp
//!
//! jasmine completions bash > ~/.bash_completion.d/jasmine
//! ```

pub mod completions;
pub mod config;
pub mod demo;
pub mod error;
pub mod render;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use error::CliError;

use crate::config::JasmineConfig;
use crate::logging::Severity;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Jasmine - ordered, human-readable diagnostic messages
#[derive(Parser, Debug)]
#[command(
    name = "jasmine",
    version,
    about = "Build ordered, human-readable diagnostic log messages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a message from flags and print it
    Render(RenderArgs),
    /// Log a sample message through the configured subscriber
    Demo(DemoArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Free-text description (repeatable)
    #[arg(short, long = "desc", value_name = "TEXT")]
    pub desc: Vec<String>,

    /// Field as KEY=VALUE (repeatable)
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub field: Vec<String>,

    /// Context entry as KEY=VALUE (repeatable)
    #[arg(short = 'x', long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Error message
    #[arg(short, long)]
    pub error: Option<String>,

    /// Stamp the message with the current time
    #[arg(short, long)]
    pub timestamp: bool,

    /// Use this Unix time instead of the wall clock
    #[arg(long, value_name = "SECONDS")]
    pub at: Option<i64>,

    /// Large block as LABEL=TEXT (repeatable)
    #[arg(short, long = "block", value_name = "LABEL=TEXT")]
    pub block: Vec<String>,

    /// JSON block as LABEL=JSON (repeatable)
    #[arg(short, long = "json", value_name = "LABEL=JSON")]
    pub json: Vec<String>,

    /// Indent JSON blocks
    #[arg(long)]
    pub indent: bool,

    /// Log the message at this severity instead of printing it
    #[arg(long, value_name = "SEVERITY")]
    pub log: Option<Severity>,

    /// Path to configuration file
    #[arg(short, long, default_value = "jasmine.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "jasmine.toml")]
    pub config: PathBuf,

    /// Indent JSON blocks
    #[arg(long)]
    pub indent: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "JASMINE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "jasmine.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration from `path` if present, then apply `JASMINE_*` overrides.
///
/// A missing file is not an error; the defaults are used instead.
pub fn load_config(path: &Path) -> Result<JasmineConfig, CliError> {
    let config = if path.exists() {
        JasmineConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        JasmineConfig::default()
    };

    Ok(config.with_env_overrides())
}
