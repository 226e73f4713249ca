//! # channeld-proto
//!
//! Value types shared between the channel core and whatever transport
//! carries its output.
//!
//! ## Features
//!
//! - Player identities, security levels, factions and chat languages
//! - Channel and member flag encodings (the only place raw bits live)
//! - The closed set of channel notice kinds with their stable codes
//! - One constructor per notification kind
//! - Optional `serde` support for every outbound type
//!
//! ## Quick Start
//!
//! ```rust
//! use channeld_proto::{MemberFlags, Notification, NoticeKind, PlayerId};
//!
//! let kicked = Notification::player_kicked("Trade", PlayerId(7), PlayerId(3));
//! assert_eq!(kicked.kind(), NoticeKind::PlayerKicked);
//!
//! let role = Notification::mode_change("Trade", PlayerId(3), MemberFlags::NONE, MemberFlags::MODERATOR);
//! println!("{}", role);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod flags;
pub mod ids;
pub mod message;
pub mod notice;
pub mod notification;

pub use self::error::{ProtocolError, Result};
pub use self::flags::{ChannelFlags, MemberFlags};
pub use self::ids::{Language, PlayerId, SecurityLevel, Team};
pub use self::message::{ChannelList, ChatLine, ListedMember, ServerMessage};
pub use self::notice::NoticeKind;
pub use self::notification::{NoticeBody, Notification, NOBODY, PLAYER_NOT_FOUND};
