//! Defaults applied to messages built by the CLI

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MessageConfig {
    /// Serialize JSON blocks with two-space indentation
    pub indent_json: bool,
    /// Stamp every message with the current time
    pub timestamp: bool,
}
