//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: The top-level [`Config`] and loading
//! - [`channels`]: Channel rule toggles and thresholds ([`ChannelsConfig`])
//! - [`catalog`]: Built-in channel catalog entries ([`CatalogEntry`])
//! - [`security`]: Speech rate limiting ([`SecurityConfig`], [`RateLimitConfig`])
//! - [`limits`]: Actor mailbox and name limits ([`LimitsConfig`])
//! - [`validation`]: Semantic checks run at startup

mod catalog;
mod channels;
mod defaults;
mod limits;
mod security;
mod types;
pub mod validation;

pub use catalog::CatalogEntry;
pub use channels::{ChannelsConfig, LanguageRestriction};
pub use limits::LimitsConfig;
pub use security::{RateLimitConfig, SecurityConfig};
pub use types::{Config, ConfigError, ServerConfig};
