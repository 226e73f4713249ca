//! Player identity and the per-player attributes channels reason about.

use std::fmt;

use crate::error::ProtocolError;

/// Opaque, globally unique player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Account security level, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SecurityLevel {
    /// Regular player.
    #[default]
    Player = 0,
    /// Community moderator.
    Moderator = 1,
    /// Game master.
    GameMaster = 2,
    /// Server administrator.
    Administrator = 3,
}

impl SecurityLevel {
    /// Whether this level is game master or higher.
    pub fn is_game_master(self) -> bool {
        self >= SecurityLevel::GameMaster
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = ProtocolError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Player),
            1 => Ok(Self::Moderator),
            2 => Ok(Self::GameMaster),
            3 => Ok(Self::Administrator),
            other => Err(ProtocolError::UnknownSecurityLevel(other)),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Moderator => "moderator",
            Self::GameMaster => "gamemaster",
            Self::Administrator => "administrator",
        };
        f.write_str(name)
    }
}

/// Faction a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Team {
    /// Alliance.
    Alliance,
    /// Horde.
    Horde,
}

impl TryFrom<u8> for Team {
    type Error = ProtocolError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Alliance),
            1 => Ok(Self::Horde),
            other => Err(ProtocolError::UnknownTeam(other)),
        }
    }
}

/// Chat language identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Language(pub u32);

impl Language {
    /// Language understood by every faction.
    pub const UNIVERSAL: Language = Language(0);
}
