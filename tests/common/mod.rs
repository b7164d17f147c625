//! Shared test utilities for Jasmine integration tests.

#![allow(dead_code)]

use jasmine::message::{FixedClock, MessageBuilder};
use serde::ser::{Error as _, Serialize, Serializer};

/// Instant used by every fixed-clock builder in the integration tests.
pub const FIXED_NOW: i64 = 1_731_000_000;

/// A builder whose `mark_timestamp` always records [`FIXED_NOW`].
pub fn fixed_builder() -> MessageBuilder {
    MessageBuilder::with_clock(FixedClock(FIXED_NOW))
}

/// A value whose serialization always fails.
pub struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("refusing to serialize"))
    }
}

/// An error type with a fixed message.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StaticError(pub &'static str);
