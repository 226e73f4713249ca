//! Delivery of channel output to members.
//!
//! Delivery is fire-and-forget. A recipient the directory no longer knows
//! is skipped; that is never a channel-level error.

use std::sync::Arc;

use channeld_proto::{ChatLine, PlayerId, ServerMessage};

use crate::services::Collaborators;
use crate::state::member::MembershipTable;

#[derive(Debug, Clone)]
pub struct ChannelDispatch {
    services: Collaborators,
}

impl ChannelDispatch {
    pub fn new(services: Collaborators) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Collaborators {
        &self.services
    }

    fn online(&self, player: PlayerId) -> bool {
        self.services.directory.player(player).is_some()
    }

    /// Deliver to a single player. Returns whether it was handed off.
    pub fn send_to_one(&self, to: PlayerId, message: impl Into<ServerMessage>) -> bool {
        if !self.online(to) {
            return false;
        }
        self.services.transport.deliver(to, Arc::new(message.into()));
        true
    }

    /// Deliver to every member. Returns the number of recipients.
    pub fn send_to_all(&self, members: &MembershipTable, message: impl Into<ServerMessage>) -> usize {
        let message = Arc::new(message.into());
        let mut delivered = 0;
        for player in members.players() {
            if self.online(player) {
                self.services.transport.deliver(player, Arc::clone(&message));
                delivered += 1;
            }
        }
        crate::metrics::record_fanout(delivered);
        delivered
    }

    /// Deliver speech. Recipients ignoring the speaker never receive it,
    /// and `exclude` (if any) is skipped.
    pub fn send_chat(
        &self,
        members: &MembershipTable,
        line: ChatLine,
        exclude: Option<PlayerId>,
    ) -> usize {
        let sender = line.sender;
        let message = Arc::new(ServerMessage::Chat(line));
        let mut delivered = 0;
        for player in members.players() {
            if Some(player) == exclude
                || !self.online(player)
                || self.services.social.has_ignore(player, sender)
            {
                continue;
            }
            self.services.transport.deliver(player, Arc::clone(&message));
            delivered += 1;
        }
        crate::metrics::record_fanout(delivered);
        delivered
    }
}
