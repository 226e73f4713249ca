//! In-memory collaborators.
//!
//! Back the console binary and the test suites. A deployment embedding the
//! channel core supplies its own implementations of the traits instead.

use std::collections::HashSet;
use std::sync::Arc;

use channeld_proto::{PlayerId, SecurityLevel, ServerMessage};
use dashmap::DashMap;
use parking_lot::Mutex;

use super::traits::{
    Collaborators, LanguageFilter, PlayerDirectory, PlayerInfo, SocialGraph, Transport,
};

/// Online players keyed by identity, with a lowercase name index.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    players: DashMap<PlayerId, PlayerInfo>,
    by_name: DashMap<String, PlayerId>,
    hidden: DashMap<PlayerId, ()>,
}

impl MemoryDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an online player.
    pub fn insert(&self, info: PlayerInfo) {
        if let Some(old) = self.players.get(&info.id) {
            self.by_name.remove(&old.name.to_lowercase());
        }
        self.by_name.insert(info.name.to_lowercase(), info.id);
        self.players.insert(info.id, info);
    }

    /// Take a player offline.
    pub fn remove(&self, id: PlayerId) -> Option<PlayerInfo> {
        let (_, info) = self.players.remove(&id)?;
        self.by_name.remove(&info.name.to_lowercase());
        Some(info)
    }

    /// Hide a player from global listings for plain players.
    pub fn set_hidden(&self, id: PlayerId, hidden: bool) {
        if hidden {
            self.hidden.insert(id, ());
        } else {
            self.hidden.remove(&id);
        }
    }
}

impl PlayerDirectory for MemoryDirectory {
    fn player(&self, id: PlayerId) -> Option<PlayerInfo> {
        self.players.get(&id).map(|p| p.clone())
    }

    fn find_by_name(&self, name: &str) -> Option<PlayerInfo> {
        let id = *self.by_name.get(&name.to_lowercase())?;
        self.player(id)
    }

    fn name_of(&self, id: PlayerId) -> Option<String> {
        self.players.get(&id).map(|p| p.name.clone())
    }

    fn is_visible_globally(&self, observer: PlayerId, target: PlayerId) -> bool {
        if observer == target || !self.hidden.contains_key(&target) {
            return true;
        }
        self.players
            .get(&observer)
            .is_some_and(|o| o.security > SecurityLevel::Player)
    }
}

/// Ignore lists as a set of (who, ignored) pairs.
#[derive(Debug, Default)]
pub struct MemorySocial {
    ignores: DashMap<PlayerId, HashSet<PlayerId>>,
}

impl MemorySocial {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// `who` starts ignoring `ignored`.
    pub fn ignore(&self, who: PlayerId, ignored: PlayerId) {
        self.ignores.entry(who).or_default().insert(ignored);
    }

    /// `who` stops ignoring `ignored`.
    pub fn unignore(&self, who: PlayerId, ignored: PlayerId) {
        if let Some(mut set) = self.ignores.get_mut(&who) {
            set.remove(&ignored);
        }
    }
}

impl SocialGraph for MemorySocial {
    fn has_ignore(&self, who: PlayerId, ignored: PlayerId) -> bool {
        self.ignores
            .get(&who)
            .is_some_and(|set| set.contains(&ignored))
    }
}

/// Accepts printable ASCII only.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiLanguageFilter;

impl LanguageFilter for AsciiLanguageFilter {
    fn check_public_message_language(&self, text: &str) -> bool {
        text.chars().all(|c| c.is_ascii() && !c.is_ascii_control())
    }
}

/// Records every delivery in order.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    log: Mutex<Vec<(PlayerId, Arc<ServerMessage>)>>,
}

impl RecordingTransport {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything delivered so far.
    pub fn drain(&self) -> Vec<(PlayerId, Arc<ServerMessage>)> {
        std::mem::take(&mut *self.log.lock())
    }

    /// Messages delivered to one player, without draining.
    pub fn delivered_to(&self, player: PlayerId) -> Vec<Arc<ServerMessage>> {
        self.log
            .lock()
            .iter()
            .filter(|(to, _)| *to == player)
            .map(|(_, msg)| Arc::clone(msg))
            .collect()
    }

    /// Number of deliveries recorded.
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    /// Whether nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn deliver(&self, to: PlayerId, message: Arc<ServerMessage>) {
        self.log.lock().push((to, message));
    }
}

/// Concrete in-memory collaborator set, kept typed for direct access.
#[derive(Debug, Clone)]
pub struct MemoryServices {
    /// Player directory.
    pub directory: Arc<MemoryDirectory>,
    /// Ignore lists.
    pub social: Arc<MemorySocial>,
    /// Delivery log.
    pub transport: Arc<RecordingTransport>,
}

impl MemoryServices {
    /// Fresh empty services.
    pub fn new() -> Self {
        Self {
            directory: Arc::new(MemoryDirectory::new()),
            social: Arc::new(MemorySocial::new()),
            transport: Arc::new(RecordingTransport::new()),
        }
    }

    /// Type-erased bundle for the channel core.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            directory: self.directory.clone(),
            social: self.social.clone(),
            language: Arc::new(AsciiLanguageFilter),
            transport: self.transport.clone(),
        }
    }
}

impl Default for MemoryServices {
    fn default() -> Self {
        Self::new()
    }
}
