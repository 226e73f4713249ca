//! Actor mailbox and channel name limits.

use serde::Deserialize;

use super::defaults::{default_mailbox_capacity, default_max_channel_name_length};

/// Resource limits for channel actors.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Channel actor mailbox capacity (default: 100).
    /// Higher values provide burst tolerance during floods.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
    /// Longest accepted custom channel name, in characters (default: 64).
    #[serde(default = "default_max_channel_name_length")]
    pub max_channel_name_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
            max_channel_name_length: default_max_channel_name_length(),
        }
    }
}
