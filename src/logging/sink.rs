//! Destinations for rendered messages

use super::Severity;
use std::sync::{Mutex, PoisonError};

/// Receives one rendered message at a time.
pub trait Sink: Send + Sync {
    fn emit(&self, severity: Severity, message: &str);
}

/// Forwards messages to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(target: "jasmine", "{}", message),
            Severity::Info => tracing::info!(target: "jasmine", "{}", message),
            Severity::Warn => tracing::warn!(target: "jasmine", "{}", message),
            Severity::Error => tracing::error!(target: "jasmine", "{}", message),
        }
    }
}

/// Keeps every emitted message in memory.
///
/// # Examples
///
/// ```
/// use jasmine::logging::{Logger, MemorySink, Severity};
///
/// let logger = Logger::new(MemorySink::default());
/// logger.warn("disk almost full");
///
/// assert_eq!(
///     logger.sink().records(),
///     vec![(Severity::Warn, "disk almost full".to_string())]
/// );
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    /// Snapshot of everything emitted so far, oldest first.
    pub fn records(&self) -> Vec<(Severity, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, severity: Severity, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, message.to_string()));
    }
}
