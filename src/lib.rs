//! channeld - channel membership and moderation core for game chat servers.
//!
//! Each chat channel is owned by a Tokio actor task; a registry maps names
//! to actors and the rest of the server talks to channels through the
//! collaborator traits in [`services`].

pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod metrics;
pub mod security;
pub mod services;
pub mod state;
pub mod telemetry;

pub use error::{ChannelError, ChannelResult};
pub use state::{ChannelCommand, ChannelRegistry};
