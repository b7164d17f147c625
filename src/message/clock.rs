//! Wall-clock source for message timestamps

use std::fmt;

/// Source of the current instant, in whole seconds since the Unix epoch.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now_unix(&self) -> i64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// A clock frozen at a single instant.
///
/// # Examples
///
/// ```
/// use jasmine::message::clock::{Clock, FixedClock};
///
/// assert_eq!(FixedClock(1_700_000_000).now_unix(), 1_700_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}
