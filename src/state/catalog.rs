//! Built-in channel catalog.

use channeld_proto::ChannelFlags;

use crate::config::CatalogEntry;

/// Catalog id of the local defense channel.
pub const LOCAL_DEFENSE_ID: u32 = 22;
/// Catalog id of the world defense channel.
pub const WORLD_DEFENSE_ID: u32 = 23;

/// Catalog used when the configuration does not supply one.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("General", 1),
        CatalogEntry::new("Trade", 2).trade().city(),
        CatalogEntry::new("LocalDefense", LOCAL_DEFENSE_ID),
        CatalogEntry::new("WorldDefense", WORLD_DEFENSE_ID),
        CatalogEntry::new("GuildRecruitment", 25).city(),
        CatalogEntry::new("LookingForGroup", 26).lfg(),
    ]
}

/// Classification flags of a built-in channel.
pub fn builtin_flags(entry: &CatalogEntry) -> ChannelFlags {
    let mut flags = ChannelFlags::GENERAL;
    if entry.trade {
        flags = flags | ChannelFlags::TRADE;
    }
    if entry.city {
        flags = flags | ChannelFlags::CITY;
    }
    if entry.lfg {
        flags | ChannelFlags::LFG
    } else {
        flags | ChannelFlags::NOT_LFG
    }
}
