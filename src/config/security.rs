//! Security configuration for speech flood control.

use serde::Deserialize;

use super::defaults::default_say_burst;

/// Security configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Rate limiting configuration.
    #[serde(default)]
    pub rate_limits: RateLimitConfig,
}

/// Per-member speech rate limiting.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Sustained messages per second per member; 0 disables throttling.
    #[serde(default)]
    pub say_rate_per_second: u32,
    /// Burst allowance on top of the sustained rate (default: 5).
    #[serde(default = "default_say_burst")]
    pub say_burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            say_rate_per_second: 0,
            say_burst: default_say_burst(),
        }
    }
}

impl RateLimitConfig {
    /// Whether speech throttling is active.
    pub fn is_enabled(&self) -> bool {
        self.say_rate_per_second > 0
    }
}
