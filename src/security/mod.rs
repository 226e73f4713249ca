//! Security module for channeld.
//!
//! Provides flood protection for channel speech:
//! - **Rate Limiting**: Governor-based token buckets keyed by player

pub mod rate_limit;

pub use rate_limit::SpeechThrottle;
