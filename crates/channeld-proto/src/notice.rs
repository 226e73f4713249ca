//! Channel notice kinds and their stable numeric codes.

use std::fmt;

use crate::error::ProtocolError;

macro_rules! notice_kinds {
    ($($(#[$meta:meta])* $variant:ident = $code:literal => $label:literal,)+) => {
        /// Every notice a channel can emit.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum NoticeKind {
            $($(#[$meta])* $variant = $code,)+
        }

        impl NoticeKind {
            /// All kinds in code order.
            pub const ALL: &'static [NoticeKind] = &[$(NoticeKind::$variant,)+];

            /// Stable numeric code.
            pub const fn code(self) -> u8 {
                self as u8
            }

            /// Upper-case label used in logs.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(NoticeKind::$variant => $label,)+
                }
            }
        }

        impl TryFrom<u8> for NoticeKind {
            type Error = ProtocolError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(NoticeKind::$variant),)+
                    other => Err(ProtocolError::UnknownNotice(other)),
                }
            }
        }
    };
}

notice_kinds! {
    /// Someone joined (broadcast).
    Joined = 0x00 => "JOINED",
    /// Someone left (broadcast).
    Left = 0x01 => "LEFT",
    /// Private join confirmation.
    YouJoined = 0x02 => "YOU_JOINED",
    /// Private leave confirmation.
    YouLeft = 0x03 => "YOU_LEFT",
    /// Join refused: password mismatch.
    WrongPassword = 0x04 => "WRONG_PASSWORD",
    /// Actor is not on the channel.
    NotMember = 0x05 => "NOT_MEMBER",
    /// Actor lacks moderator rights.
    NotModerator = 0x06 => "NOT_MODERATOR",
    /// Password was changed.
    PasswordChanged = 0x07 => "PASSWORD_CHANGED",
    /// Ownership moved.
    OwnerChanged = 0x08 => "OWNER_CHANGED",
    /// Named player absent or not addressable.
    PlayerNotFound = 0x09 => "PLAYER_NOT_FOUND",
    /// Action reserved to the owner.
    NotOwner = 0x0A => "NOT_OWNER",
    /// Reply to an owner query.
    ChannelOwnerReply = 0x0B => "CHANNEL_OWNER",
    /// Member role bits changed.
    RoleChanged = 0x0C => "MODE_CHANGE",
    /// Join/leave announcements enabled.
    AnnouncementsOn = 0x0D => "ANNOUNCEMENTS_ON",
    /// Join/leave announcements disabled.
    AnnouncementsOff = 0x0E => "ANNOUNCEMENTS_OFF",
    /// Moderation enabled.
    ModerationOn = 0x0F => "MODERATION_ON",
    /// Moderation disabled.
    ModerationOff = 0x10 => "MODERATION_OFF",
    /// Actor may not speak.
    Muted = 0x11 => "MUTED",
    /// A member was kicked.
    PlayerKicked = 0x12 => "PLAYER_KICKED",
    /// Actor is banned from the channel.
    Banned = 0x13 => "BANNED",
    /// A member was banned.
    PlayerBanned = 0x14 => "PLAYER_BANNED",
    /// A ban was lifted.
    PlayerUnbanned = 0x15 => "PLAYER_UNBANNED",
    /// Unban target was not banned.
    PlayerNotBanned = 0x16 => "PLAYER_NOT_BANNED",
    /// Target already on the channel.
    PlayerAlreadyMember = 0x17 => "PLAYER_ALREADY_MEMBER",
    /// Invitation delivered to the invitee.
    Invite = 0x18 => "INVITE",
    /// Invitation refused across factions.
    InviteWrongFaction = 0x19 => "INVITE_WRONG_FACTION",
    /// Action refused across factions.
    WrongFaction = 0x1A => "WRONG_FACTION",
    /// Channel name rejected.
    InvalidName = 0x1B => "INVALID_NAME",
    /// Channel is not moderated.
    NotModerated = 0x1C => "NOT_MODERATED",
    /// Invitation confirmation to the inviter.
    PlayerInvited = 0x1D => "PLAYER_INVITED",
    /// Invitee is banned.
    PlayerInviteBanned = 0x1E => "PLAYER_INVITE_BANNED",
    /// Actor is speaking too fast.
    Throttled = 0x1F => "THROTTLED",
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
