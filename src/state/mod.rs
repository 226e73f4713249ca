//! Channel state.
//!
//! Bottom-up: the [`member`] table and [`policy`] rules feed the
//! synchronous [`channel`] state machine; an [`actor`] task owns each
//! channel and the [`registry`] maps names to their [`handle`]s.

pub mod actor;
pub mod catalog;
pub mod channel;
pub mod dispatch;
pub mod handle;
pub mod member;
pub mod policy;
pub mod registry;

pub use channel::{
    Channel, ChannelCommand, ChannelContext, ChannelSnapshot, Outcome, Report, RoleMode,
};
pub use handle::ChannelHandle;
pub use member::{MemberRole, MembershipTable};
pub use registry::ChannelRegistry;
