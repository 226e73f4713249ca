//! Collaborator seams consumed by channels.
//!
//! Channels never own player sessions. Everything they need to know about
//! a player, and every way they have of reaching one, goes through these
//! traits. Calls are synchronous and best-effort: a lookup that comes back
//! empty simply excludes that player.

use std::sync::Arc;

use channeld_proto::{PlayerId, SecurityLevel, ServerMessage, Team};

/// What a channel may know about an online player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    /// Identity.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Account security level.
    pub security: SecurityLevel,
    /// Faction.
    pub team: Team,
    /// Guild membership, if any.
    pub guild_id: Option<u32>,
    /// Visual honor rank tier.
    pub honor_rank: u8,
}

impl PlayerInfo {
    /// Player-level record with no guild and rank 0.
    pub fn new(id: PlayerId, name: impl Into<String>, team: Team) -> Self {
        Self {
            id,
            name: name.into(),
            security: SecurityLevel::Player,
            team,
            guild_id: None,
            honor_rank: 0,
        }
    }

    /// Whether the account is game master or higher.
    pub fn is_game_master(&self) -> bool {
        self.security.is_game_master()
    }
}

/// Resolves identities, names and visibility.
pub trait PlayerDirectory: Send + Sync {
    /// Online player by identity.
    fn player(&self, id: PlayerId) -> Option<PlayerInfo>;

    /// Online player by name (case-insensitive).
    fn find_by_name(&self, name: &str) -> Option<PlayerInfo>;

    /// Name of a possibly offline player.
    fn name_of(&self, id: PlayerId) -> Option<String>;

    /// Whether `target` shows up for `observer` in global listings.
    fn is_visible_globally(&self, observer: PlayerId, target: PlayerId) -> bool;
}

/// Ignore lists.
pub trait SocialGraph: Send + Sync {
    /// Whether `who` ignores `ignored`.
    fn has_ignore(&self, who: PlayerId, ignored: PlayerId) -> bool;
}

/// Public-message language check.
pub trait LanguageFilter: Send + Sync {
    /// Whether `text` is acceptable on realm-restricted channels.
    fn check_public_message_language(&self, text: &str) -> bool;
}

/// Fire-and-forget delivery to one player.
pub trait Transport: Send + Sync {
    /// Hand a message to the player's session. Never blocks.
    fn deliver(&self, to: PlayerId, message: Arc<ServerMessage>);
}

/// Bundle of collaborators shared by every channel.
#[derive(Clone)]
pub struct Collaborators {
    /// Player directory.
    pub directory: Arc<dyn PlayerDirectory>,
    /// Ignore lists.
    pub social: Arc<dyn SocialGraph>,
    /// Language check.
    pub language: Arc<dyn LanguageFilter>,
    /// Outbound delivery.
    pub transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
