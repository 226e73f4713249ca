//! Channel and member flag bytes.
//!
//! Everything above this module works with named booleans; these newtypes
//! are the single encode/decode boundary for the bit patterns clients see.

use std::fmt;
use std::ops::BitOr;

use crate::error::ProtocolError;

/// Channel classification bits sent in join confirmations and list replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChannelFlags(u8);

impl ChannelFlags {
    /// No flags.
    pub const NONE: ChannelFlags = ChannelFlags(0x00);
    /// User-created channel.
    pub const CUSTOM: ChannelFlags = ChannelFlags(0x01);
    /// Trade channel.
    pub const TRADE: ChannelFlags = ChannelFlags(0x04);
    /// Built-in channel that is not the LFG channel.
    pub const NOT_LFG: ChannelFlags = ChannelFlags(0x08);
    /// Any built-in channel.
    pub const GENERAL: ChannelFlags = ChannelFlags(0x10);
    /// City-only channel.
    pub const CITY: ChannelFlags = ChannelFlags(0x20);
    /// Looking-for-group channel.
    pub const LFG: ChannelFlags = ChannelFlags(0x40);

    /// Raw flag byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from a raw byte, keeping unknown bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Whether every bit in `other` is set.
    pub const fn contains(self, other: ChannelFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ChannelFlags {
    type Output = ChannelFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        ChannelFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for ChannelFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Per-member role byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MemberFlags(u8);

impl MemberFlags {
    /// Plain member.
    pub const NONE: MemberFlags = MemberFlags(0x00);
    /// Channel owner.
    pub const OWNER: MemberFlags = MemberFlags(0x01);
    /// Channel moderator.
    pub const MODERATOR: MemberFlags = MemberFlags(0x02);
    /// Muted member.
    pub const MUTED: MemberFlags = MemberFlags(0x08);

    const DEFINED: u8 = Self::OWNER.0 | Self::MODERATOR.0 | Self::MUTED.0;

    /// Encode named role booleans.
    pub const fn from_roles(owner: bool, moderator: bool, muted: bool) -> Self {
        let mut bits = 0;
        if owner {
            bits |= Self::OWNER.0;
        }
        if moderator {
            bits |= Self::MODERATOR.0;
        }
        if muted {
            bits |= Self::MUTED.0;
        }
        Self(bits)
    }

    /// Raw flag byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Owner bit.
    pub const fn is_owner(self) -> bool {
        self.0 & Self::OWNER.0 != 0
    }

    /// Moderator bit.
    pub const fn is_moderator(self) -> bool {
        self.0 & Self::MODERATOR.0 != 0
    }

    /// Muted bit.
    pub const fn is_muted(self) -> bool {
        self.0 & Self::MUTED.0 != 0
    }
}

impl TryFrom<u8> for MemberFlags {
    type Error = ProtocolError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !Self::DEFINED != 0 {
            return Err(ProtocolError::UndefinedMemberBits(bits));
        }
        Ok(Self(bits))
    }
}

impl BitOr for MemberFlags {
    type Output = MemberFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        MemberFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for MemberFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_guild_pattern() {
        let flags = ChannelFlags::GENERAL | ChannelFlags::CITY | ChannelFlags::NOT_LFG;
        assert_eq!(flags.bits(), 0x38);
        assert!(flags.contains(ChannelFlags::CITY));
        assert!(!flags.contains(ChannelFlags::TRADE));
    }

    #[test]
    fn test_member_roles_encode() {
        let flags = MemberFlags::from_roles(true, true, false);
        assert_eq!(flags.bits(), 0x03);
        assert!(flags.is_owner());
        assert!(flags.is_moderator());
        assert!(!flags.is_muted());
        assert_eq!(MemberFlags::from_roles(false, false, true), MemberFlags::MUTED);
    }

    #[test]
    fn test_member_flags_reject_undefined_bits() {
        assert_eq!(
            MemberFlags::try_from(0x04),
            Err(ProtocolError::UndefinedMemberBits(0x04))
        );
        assert_eq!(
            MemberFlags::try_from(0x0B),
            Ok(MemberFlags::OWNER | MemberFlags::MODERATOR | MemberFlags::MUTED)
        );
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(ChannelFlags::CUSTOM.to_string(), "0x01");
        assert_eq!(MemberFlags::MUTED.to_string(), "0x08");
    }
}
