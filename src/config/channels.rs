//! Channel rule configuration.
//!
//! These values are read once into a `PermissionPolicy`; handlers never
//! consult configuration directly.

use channeld_proto::SecurityLevel;
use serde::Deserialize;

use super::defaults::default_world_defense_min_rank;

/// Which channels are subject to the public-message language check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguageRestriction {
    /// No restriction.
    #[default]
    Off,
    /// Built-in channels only.
    BuiltIn,
    /// Public channels that are realm restricted.
    PublicRealm,
    /// Every channel.
    All,
}

impl LanguageRestriction {
    /// Decode the numeric config mode. Unknown modes yield `None`.
    pub fn from_mode(mode: u8) -> Option<Self> {
        match mode {
            0 => Some(Self::Off),
            1 => Some(Self::BuiltIn),
            2 => Some(Self::PublicRealm),
            3 => Some(Self::All),
            _ => None,
        }
    }
}

/// `[channels]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsConfig {
    /// Suppress join/leave announcements for game masters.
    #[serde(default)]
    pub gm_join_silently: bool,
    /// Allow interaction across factions.
    #[serde(default)]
    pub cross_faction: bool,
    /// Language restriction mode (0 off, 1 built-in, 2 public+realm, 3 all).
    #[serde(default)]
    pub restricted_language_mode: u8,
    /// Member count at which custom channels become static; 0 disables.
    #[serde(default)]
    pub static_auto_threshold: usize,
    /// Highest security level a plain player can see in owner and list replies.
    #[serde(default)]
    pub gm_level_in_who_list: u8,
    /// Minimum honor rank to speak in the local defense channel.
    #[serde(default)]
    pub local_defense_min_rank: u8,
    /// Minimum honor rank to speak in the world defense channel (default: 6).
    #[serde(default = "default_world_defense_min_rank")]
    pub world_defense_min_rank: u8,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            gm_join_silently: false,
            cross_faction: false,
            restricted_language_mode: 0,
            static_auto_threshold: 0,
            gm_level_in_who_list: 0,
            local_defense_min_rank: 0,
            world_defense_min_rank: default_world_defense_min_rank(),
        }
    }
}

impl ChannelsConfig {
    /// Decoded language restriction; invalid modes are caught by validation
    /// and fall back to `Off` here.
    pub fn language_restriction(&self) -> LanguageRestriction {
        LanguageRestriction::from_mode(self.restricted_language_mode).unwrap_or_default()
    }

    /// Decoded who-list visibility level.
    pub fn who_list_level(&self) -> SecurityLevel {
        SecurityLevel::try_from(self.gm_level_in_who_list).unwrap_or_default()
    }
}
