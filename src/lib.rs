//! Jasmine - ordered, human-readable diagnostic log messages
//!
//! This library provides a fluent [`MessageBuilder`](message::MessageBuilder)
//! that accumulates descriptions, fields, request context, an error, a
//! timestamp and serialized payloads, and renders them into one text block
//! for a logging backend.

pub mod cli;
pub mod config;
pub mod logging;
pub mod message;

pub use logging::{new_msg, Logger};
pub use message::MessageBuilder;
