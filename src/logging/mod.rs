//! Logger facade for rendered messages
//!
//! Pairs the [`MessageBuilder`] with a [`Sink`], and installs the global
//! `tracing` subscriber that the default [`TracingSink`] writes through.
//!
//! ```no_run
//! use jasmine::config::LoggingConfig;
//! use jasmine::logging::{init_tracing, new_msg, Logger};
//!
//! init_tracing(&LoggingConfig::default()).unwrap();
//!
//! let logger: Logger = Logger::default();
//! logger.error(new_msg().add_description("user login fail").add_field("retry", 5));
//! ```

pub mod sink;

pub use sink::{MemorySink, Sink, TracingSink};

use crate::config::{LogFormat, LoggingConfig};
use crate::message::format::display_lossy;
use crate::message::MessageBuilder;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level a message is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Start a new message.
pub fn new_msg() -> MessageBuilder {
    MessageBuilder::new()
}

/// Writes messages to a [`Sink`] at a chosen severity.
///
/// Anything `Display` can be logged, including a builder mid-chain; a
/// `Display` implementation that errors is logged as a marker instead.
#[derive(Debug, Default)]
pub struct Logger<S: Sink = TracingSink> {
    sink: S,
}

impl<S: Sink> Logger<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        self.sink.emit(severity, &display_lossy(&message));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }
}

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
/// Components are emitted in sorted order so the result is stable.
///
/// # Examples
///
/// ```
/// use jasmine::config::logging::LoggingConfig;
/// use jasmine::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("cli".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: jasmine::config::logging::LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,jasmine::cli=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",jasmine::{}={}", component, level));
        }
    }

    filter_str
}

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured directives.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    config: &LoggingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}
