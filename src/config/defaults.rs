//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
#[allow(dead_code)]
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Channel Rule Defaults
// =============================================================================

pub fn default_world_defense_min_rank() -> u8 {
    6
}

// =============================================================================
// Rate Limit Defaults
// =============================================================================

pub fn default_say_burst() -> u32 {
    5
}

// =============================================================================
// Limit Defaults
// =============================================================================

pub fn default_mailbox_capacity() -> usize {
    100
}

pub fn default_max_channel_name_length() -> usize {
    64
}
