//! Integration test common infrastructure.
//!
//! Provides an in-memory realm: collaborators, a live registry and helpers
//! for asserting on delivered notifications.

#![allow(dead_code)]

use channeld::config::Config;
use channeld::services::{MemoryServices, PlayerInfo};
use channeld::state::{ChannelCommand, ChannelRegistry, ChannelSnapshot, Outcome};
use channeld::ChannelResult;
use channeld_proto::{
    ChatLine, NoticeBody, NoticeKind, PlayerId, SecurityLevel, ServerMessage, Team,
};

/// A registry wired to in-memory services.
pub struct TestRealm {
    pub services: MemoryServices,
    pub registry: ChannelRegistry,
}

impl TestRealm {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let services = MemoryServices::new();
        let registry = ChannelRegistry::new(&config, services.collaborators());
        Self { services, registry }
    }

    pub fn player(&self, id: u64, name: &str) -> PlayerInfo {
        self.player_as(id, name, Team::Alliance, SecurityLevel::Player)
    }

    pub fn player_as(&self, id: u64, name: &str, team: Team, security: SecurityLevel) -> PlayerInfo {
        let mut info = PlayerInfo::new(PlayerId(id), name, team);
        info.security = security;
        self.services.directory.insert(info.clone());
        info
    }

    pub async fn join(&self, player: &PlayerInfo, channel: &str) -> ChannelResult<Outcome> {
        self.registry.join(player, channel, None).await
    }

    pub async fn run(
        &self,
        player: &PlayerInfo,
        channel: &str,
        command: ChannelCommand,
    ) -> ChannelResult<Outcome> {
        self.registry.execute(player, channel, command).await
    }

    pub async fn snapshot(&self, channel: &str) -> ChannelSnapshot {
        self.registry
            .snapshot(channel)
            .await
            .expect("channel should exist")
    }

    /// Forget everything delivered so far.
    pub fn clear(&self) {
        self.services.transport.drain();
    }

    pub fn notices_for(&self, player: &PlayerInfo) -> Vec<NoticeBody> {
        self.services
            .transport
            .delivered_to(player.id)
            .iter()
            .filter_map(|m| m.as_notification().map(|n| n.body.clone()))
            .collect()
    }

    pub fn kinds_for(&self, player: &PlayerInfo) -> Vec<NoticeKind> {
        self.notices_for(player).iter().map(NoticeBody::kind).collect()
    }

    pub fn chat_for(&self, player: &PlayerInfo) -> Vec<ChatLine> {
        self.services
            .transport
            .delivered_to(player.id)
            .iter()
            .filter_map(|m| match &**m {
                ServerMessage::Chat(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }
}
