//! Channel notifications.
//!
//! A [`Notification`] is the logical form of one channel notice: the channel
//! name plus the kind-specific payload. Each kind has exactly one
//! constructor here, and each constructor is a pure function of its
//! arguments.

use std::fmt;

use crate::flags::{ChannelFlags, MemberFlags};
use crate::ids::PlayerId;
use crate::notice::NoticeKind;

/// Owner name reported when the channel has no visible owner.
pub const NOBODY: &str = "Nobody";

/// Owner name reported when the owner's name cannot be resolved.
pub const PLAYER_NOT_FOUND: &str = "PLAYER_NOT_FOUND";

/// Kind-specific notification payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[allow(missing_docs)]
pub enum NoticeBody {
    Joined { player: PlayerId },
    Left { player: PlayerId },
    YouJoined { flags: ChannelFlags, channel_id: u32, split_index: u32 },
    YouLeft,
    WrongPassword,
    NotMember,
    NotModerator,
    PasswordChanged { by: PlayerId },
    OwnerChanged { owner: Option<PlayerId> },
    PlayerNotFound { name: String },
    NotOwner,
    ChannelOwnerReply { owner_name: String },
    RoleChanged { player: PlayerId, old: MemberFlags, new: MemberFlags },
    AnnouncementsOn { by: Option<PlayerId> },
    AnnouncementsOff { by: Option<PlayerId> },
    ModerationOn { by: Option<PlayerId> },
    ModerationOff { by: Option<PlayerId> },
    Muted,
    PlayerKicked { target: PlayerId, by: PlayerId },
    Banned,
    PlayerBanned { target: PlayerId, by: PlayerId },
    PlayerUnbanned { target: PlayerId, by: PlayerId },
    PlayerNotBanned { name: String },
    PlayerAlreadyMember { player: PlayerId },
    Invite { from: PlayerId },
    InviteWrongFaction,
    WrongFaction,
    InvalidName,
    NotModerated,
    PlayerInvited { name: String },
    PlayerInviteBanned { name: String },
    Throttled,
}

impl NoticeBody {
    /// Notice kind of this payload.
    pub fn kind(&self) -> NoticeKind {
        match self {
            Self::Joined { .. } => NoticeKind::Joined,
            Self::Left { .. } => NoticeKind::Left,
            Self::YouJoined { .. } => NoticeKind::YouJoined,
            Self::YouLeft => NoticeKind::YouLeft,
            Self::WrongPassword => NoticeKind::WrongPassword,
            Self::NotMember => NoticeKind::NotMember,
            Self::NotModerator => NoticeKind::NotModerator,
            Self::PasswordChanged { .. } => NoticeKind::PasswordChanged,
            Self::OwnerChanged { .. } => NoticeKind::OwnerChanged,
            Self::PlayerNotFound { .. } => NoticeKind::PlayerNotFound,
            Self::NotOwner => NoticeKind::NotOwner,
            Self::ChannelOwnerReply { .. } => NoticeKind::ChannelOwnerReply,
            Self::RoleChanged { .. } => NoticeKind::RoleChanged,
            Self::AnnouncementsOn { .. } => NoticeKind::AnnouncementsOn,
            Self::AnnouncementsOff { .. } => NoticeKind::AnnouncementsOff,
            Self::ModerationOn { .. } => NoticeKind::ModerationOn,
            Self::ModerationOff { .. } => NoticeKind::ModerationOff,
            Self::Muted => NoticeKind::Muted,
            Self::PlayerKicked { .. } => NoticeKind::PlayerKicked,
            Self::Banned => NoticeKind::Banned,
            Self::PlayerBanned { .. } => NoticeKind::PlayerBanned,
            Self::PlayerUnbanned { .. } => NoticeKind::PlayerUnbanned,
            Self::PlayerNotBanned { .. } => NoticeKind::PlayerNotBanned,
            Self::PlayerAlreadyMember { .. } => NoticeKind::PlayerAlreadyMember,
            Self::Invite { .. } => NoticeKind::Invite,
            Self::InviteWrongFaction => NoticeKind::InviteWrongFaction,
            Self::WrongFaction => NoticeKind::WrongFaction,
            Self::InvalidName => NoticeKind::InvalidName,
            Self::NotModerated => NoticeKind::NotModerated,
            Self::PlayerInvited { .. } => NoticeKind::PlayerInvited,
            Self::PlayerInviteBanned { .. } => NoticeKind::PlayerInviteBanned,
            Self::Throttled => NoticeKind::Throttled,
        }
    }
}

/// One channel notice addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Notification {
    /// Channel the notice concerns.
    pub channel: String,
    /// Kind-specific payload.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub body: NoticeBody,
}

macro_rules! bare_notice {
    ($($(#[$meta:meta])* $name:ident => $variant:ident,)+) => {
        $(
            $(#[$meta])*
            pub fn $name(channel: &str) -> Self {
                Self::new(channel, NoticeBody::$variant)
            }
        )+
    };
}

macro_rules! player_notice {
    ($($(#[$meta:meta])* $name:ident($arg:ident) => $variant:ident,)+) => {
        $(
            $(#[$meta])*
            pub fn $name(channel: &str, $arg: PlayerId) -> Self {
                Self::new(channel, NoticeBody::$variant { $arg })
            }
        )+
    };
}

macro_rules! named_notice {
    ($($(#[$meta:meta])* $name:ident => $variant:ident,)+) => {
        $(
            $(#[$meta])*
            pub fn $name(channel: &str, name: &str) -> Self {
                Self::new(channel, NoticeBody::$variant { name: name.to_string() })
            }
        )+
    };
}

macro_rules! sanction_notice {
    ($($(#[$meta:meta])* $name:ident => $variant:ident,)+) => {
        $(
            $(#[$meta])*
            pub fn $name(channel: &str, target: PlayerId, by: PlayerId) -> Self {
                Self::new(channel, NoticeBody::$variant { target, by })
            }
        )+
    };
}

macro_rules! toggle_notice {
    ($($(#[$meta:meta])* $name:ident => $variant:ident,)+) => {
        $(
            $(#[$meta])*
            pub fn $name(channel: &str, by: Option<PlayerId>) -> Self {
                Self::new(channel, NoticeBody::$variant { by })
            }
        )+
    };
}

impl Notification {
    /// Build a notification from its parts.
    pub fn new(channel: &str, body: NoticeBody) -> Self {
        Self {
            channel: channel.to_string(),
            body,
        }
    }

    /// Notice kind.
    pub fn kind(&self) -> NoticeKind {
        self.body.kind()
    }

    bare_notice! {
        /// Private leave confirmation.
        you_left => YouLeft,
        /// Password mismatch on join.
        wrong_password => WrongPassword,
        /// Actor is not on the channel.
        not_member => NotMember,
        /// Actor lacks moderator rights.
        not_moderator => NotModerator,
        /// Action reserved to the owner.
        not_owner => NotOwner,
        /// Actor may not speak.
        muted => Muted,
        /// Actor is banned.
        banned => Banned,
        /// Invitation refused across factions.
        invite_wrong_faction => InviteWrongFaction,
        /// Action refused across factions.
        wrong_faction => WrongFaction,
        /// Channel name rejected.
        invalid_name => InvalidName,
        /// Channel is not moderated.
        not_moderated => NotModerated,
        /// Actor is speaking too fast.
        throttled => Throttled,
    }

    player_notice! {
        /// Broadcast: `player` joined.
        joined(player) => Joined,
        /// Broadcast: `player` left.
        left(player) => Left,
        /// Broadcast: password changed by `by`.
        password_changed(by) => PasswordChanged,
        /// Target `player` is already on the channel.
        player_already_member(player) => PlayerAlreadyMember,
        /// Invitation from `from`.
        invite(from) => Invite,
    }

    named_notice! {
        /// Named player absent or not addressable.
        player_not_found => PlayerNotFound,
        /// Unban target was not banned.
        player_not_banned => PlayerNotBanned,
        /// Invitation confirmation.
        player_invited => PlayerInvited,
        /// Invitee is banned.
        player_invite_banned => PlayerInviteBanned,
    }

    sanction_notice! {
        /// Broadcast: `target` kicked by `by`.
        player_kicked => PlayerKicked,
        /// Broadcast: `target` banned by `by`.
        player_banned => PlayerBanned,
        /// Broadcast: `target` unbanned by `by`.
        player_unbanned => PlayerUnbanned,
    }

    toggle_notice! {
        /// Announcements enabled (`None` = system).
        announcements_on => AnnouncementsOn,
        /// Announcements disabled (`None` = system).
        announcements_off => AnnouncementsOff,
        /// Moderation enabled (`None` = system).
        moderation_on => ModerationOn,
        /// Moderation disabled (`None` = system).
        moderation_off => ModerationOff,
    }

    /// Private join confirmation carrying the channel classification.
    pub fn you_joined(channel: &str, flags: ChannelFlags, channel_id: u32) -> Self {
        Self::new(
            channel,
            NoticeBody::YouJoined {
                flags,
                channel_id,
                split_index: 0,
            },
        )
    }

    /// Broadcast: ownership moved to `owner` (`None` = cleared).
    pub fn owner_changed(channel: &str, owner: Option<PlayerId>) -> Self {
        Self::new(channel, NoticeBody::OwnerChanged { owner })
    }

    /// Reply to an owner query.
    pub fn channel_owner(channel: &str, owner_name: &str) -> Self {
        Self::new(
            channel,
            NoticeBody::ChannelOwnerReply {
                owner_name: owner_name.to_string(),
            },
        )
    }

    /// Broadcast: role bits of `player` went from `old` to `new`.
    pub fn mode_change(channel: &str, player: PlayerId, old: MemberFlags, new: MemberFlags) -> Self {
        Self::new(channel, NoticeBody::RoleChanged { player, old, new })
    }
}

fn write_opt(f: &mut fmt::Formatter<'_>, key: &str, id: &Option<PlayerId>) -> fmt::Result {
    match id {
        Some(id) => write!(f, " {}={}", key, id),
        None => write!(f, " {}=-", key),
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.channel, self.kind())?;
        match &self.body {
            NoticeBody::Joined { player }
            | NoticeBody::Left { player }
            | NoticeBody::PlayerAlreadyMember { player } => write!(f, " player={}", player),
            NoticeBody::YouJoined {
                flags, channel_id, ..
            } => write!(f, " flags={} id={}", flags, channel_id),
            NoticeBody::PasswordChanged { by } => write!(f, " by={}", by),
            NoticeBody::OwnerChanged { owner } => write_opt(f, "owner", owner),
            NoticeBody::PlayerNotFound { name }
            | NoticeBody::PlayerNotBanned { name }
            | NoticeBody::PlayerInvited { name }
            | NoticeBody::PlayerInviteBanned { name } => write!(f, " name={}", name),
            NoticeBody::ChannelOwnerReply { owner_name } => write!(f, " owner={}", owner_name),
            NoticeBody::RoleChanged { player, old, new } => {
                write!(f, " player={} old={} new={}", player, old, new)
            }
            NoticeBody::AnnouncementsOn { by }
            | NoticeBody::AnnouncementsOff { by }
            | NoticeBody::ModerationOn { by }
            | NoticeBody::ModerationOff { by } => write_opt(f, "by", by),
            NoticeBody::PlayerKicked { target, by }
            | NoticeBody::PlayerBanned { target, by }
            | NoticeBody::PlayerUnbanned { target, by } => {
                write!(f, " target={} by={}", target, by)
            }
            NoticeBody::Invite { from } => write!(f, " from={}", from),
            _ => Ok(()),
        }
    }
}
