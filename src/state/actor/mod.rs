//! Actor Model for Channel State Management.
//!
//! This module implements the `ChannelActor`, which owns a single
//! [`Channel`] in an isolated Tokio task. Commands against one channel are
//! serialized by its mailbox; different channels run in parallel.
//!
//! # Lifecycle
//!
//! - **Active**: every event is applied to the channel in arrival order.
//! - **Draining**: a disposable channel (custom, dynamic, empty) removes its
//!   own registry entry and answers every later command with
//!   [`ChannelError::Draining`], so callers retry against a fresh instance.

use std::sync::Weak;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info};

use crate::error::ChannelError;
use crate::state::channel::Channel;
use crate::state::handle::ChannelHandle;
use crate::telemetry::spans;

mod types;

pub use types::ChannelEvent;

/// Registry map as seen by an actor: lowercase name to handle.
pub type ChannelMap = DashMap<String, ChannelHandle>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActorState {
    Active,
    Draining,
}

/// The Channel Actor.
pub struct ChannelActor {
    channel: Channel,
    key: String,
    instance: u64,
    registry: Weak<ChannelMap>,
    state: ActorState,
}

impl ChannelActor {
    /// Spawn an actor for `channel` and return its handle.
    ///
    /// `key` is the registry key the actor removes when it drains, and
    /// only while that entry still carries `instance`.
    pub fn spawn(
        channel: Channel,
        key: String,
        instance: u64,
        registry: Weak<ChannelMap>,
        capacity: usize,
    ) -> ChannelHandle {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let span = spans::channel(channel.name());
        let handle = ChannelHandle::new(channel.name(), instance, tx);

        let actor = Self {
            channel,
            key,
            instance,
            registry,
            state: ActorState::Active,
        };

        tokio::spawn(actor.run(rx).instrument(span));

        handle
    }

    /// The main actor loop.
    async fn run(mut self, mut rx: mpsc::Receiver<ChannelEvent>) {
        while let Some(event) = rx.recv().await {
            self.handle_event(event);
        }
        debug!(channel = %self.channel.name(), instance = self.instance, "actor stopped");
    }

    fn handle_event(&mut self, event: ChannelEvent) {
        if self.state == ActorState::Draining {
            self.refuse(event);
            return;
        }

        match event {
            ChannelEvent::Command {
                actor,
                command,
                reply_tx,
            } => {
                let result = self.channel.execute(&actor, command);
                self.settle();
                let _ = reply_tx.send(result);
            }
            ChannelEvent::SetStatic {
                want_static,
                reply_tx,
            } => {
                let changed = self.channel.convert_static(want_static, true);
                self.settle();
                let _ = reply_tx.send(Ok(changed));
            }
            ChannelEvent::Snapshot { reply_tx } => {
                let _ = reply_tx.send(self.channel.snapshot());
            }
        }
    }

    /// Post-mutation bookkeeping. Runs before the reply goes out so the
    /// caller never observes a drained channel still registered.
    fn settle(&mut self) {
        crate::metrics::set_channel_members(self.channel.name(), self.channel.members().len());
        self.cleanup_if_empty();
    }

    /// Answer an event that arrived after the channel started draining.
    fn refuse(&self, event: ChannelEvent) {
        debug!(
            channel = %self.channel.name(),
            event = event.label(),
            "event refused while draining"
        );
        match event {
            ChannelEvent::Command { reply_tx, .. } => {
                let _ = reply_tx.send(Err(ChannelError::Draining));
            }
            ChannelEvent::SetStatic { reply_tx, .. } => {
                let _ = reply_tx.send(Err(ChannelError::Draining));
            }
            ChannelEvent::Snapshot { reply_tx } => {
                let _ = reply_tx.send(self.channel.snapshot());
            }
        }
    }

    fn cleanup_if_empty(&mut self) {
        if self.state == ActorState::Draining || !self.channel.is_disposable() {
            return;
        }
        self.state = ActorState::Draining;

        crate::metrics::remove_channel_metrics(self.channel.name());

        if let Some(registry) = self.registry.upgrade() {
            let instance = self.instance;
            if registry
                .remove_if(&self.key, |_, handle| handle.instance() == instance)
                .is_some()
            {
                crate::metrics::channel_destroyed();
            }
        }
        info!(channel = %self.channel.name(), instance = self.instance, "channel drained");
    }
}
