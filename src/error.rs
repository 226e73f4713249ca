//! Unified error handling for channeld.
//!
//! Every channel command failure is a [`ChannelError`]. Each variant maps to
//! at most one notification for the acting player and to a static code used
//! for log fields and metric labels.

use channeld_proto::{Notification, PlayerId};
use thiserror::Error;

// ============================================================================
// Channel Errors (actor operations)
// ============================================================================

/// Channel operation errors.
///
/// Failures never mutate channel state. Whether the acting player hears
/// about one is decided per call site; this type only knows what the
/// notification would look like.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("not on channel")]
    NotMember,

    #[error("not a channel moderator")]
    NotModerator,

    #[error("not the channel owner")]
    NotOwner,

    #[error("player {0} not found")]
    PlayerNotFound(String),

    #[error("player {0} is already on the channel")]
    AlreadyMember(PlayerId),

    #[error("banned from channel")]
    Banned,

    #[error("wrong channel password")]
    WrongPassword,

    #[error("cannot invite across factions")]
    InviteWrongFaction,

    #[error("muted")]
    Muted,

    #[error("player {0} is not banned")]
    NotBanned(String),

    #[error("player {0} is banned and cannot be invited")]
    InviteBanned(String),

    #[error("invalid channel name")]
    InvalidName,

    #[error("speaking too fast")]
    Throttled,

    /// Legacy guild refusal; never reported to the player.
    #[error("guild members cannot join this channel")]
    GuildRestricted,

    /// The channel actor is shutting down after draining.
    #[error("channel is draining")]
    Draining,
}

impl ChannelError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotMember => "not_member",
            Self::NotModerator => "not_moderator",
            Self::NotOwner => "not_owner",
            Self::PlayerNotFound(_) => "player_not_found",
            Self::AlreadyMember(_) => "already_member",
            Self::Banned => "banned",
            Self::WrongPassword => "wrong_password",
            Self::InviteWrongFaction => "invite_wrong_faction",
            Self::Muted => "muted",
            Self::NotBanned(_) => "not_banned",
            Self::InviteBanned(_) => "invite_banned",
            Self::InvalidName => "invalid_name",
            Self::Throttled => "throttled",
            Self::GuildRestricted => "guild_restricted",
            Self::Draining => "draining",
        }
    }

    /// Convert to the notification delivered to the acting player.
    ///
    /// Returns `None` for errors that never warrant a client-visible notice.
    pub fn to_notification(&self, channel: &str) -> Option<Notification> {
        let notice = match self {
            Self::NotMember => Notification::not_member(channel),
            Self::NotModerator => Notification::not_moderator(channel),
            Self::NotOwner => Notification::not_owner(channel),
            Self::PlayerNotFound(name) => Notification::player_not_found(channel, name),
            Self::AlreadyMember(player) => Notification::player_already_member(channel, *player),
            Self::Banned => Notification::banned(channel),
            Self::WrongPassword => Notification::wrong_password(channel),
            Self::InviteWrongFaction => Notification::invite_wrong_faction(channel),
            Self::Muted => Notification::muted(channel),
            Self::NotBanned(name) => Notification::player_not_banned(channel, name),
            Self::InviteBanned(name) => Notification::player_invite_banned(channel, name),
            Self::InvalidName => Notification::invalid_name(channel),
            Self::Throttled => Notification::throttled(channel),

            // These errors don't get client-visible notices
            Self::GuildRestricted => return None,
            Self::Draining => return None,
        };
        Some(notice)
    }
}

/// Result type for channel commands.
pub type ChannelResult<T> = Result<T, ChannelError>;
