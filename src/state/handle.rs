//! Cloneable front door to a channel actor.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::error::{ChannelError, ChannelResult};
use crate::services::PlayerInfo;
use crate::state::actor::ChannelEvent;
use crate::state::channel::{ChannelCommand, ChannelSnapshot, Outcome};

/// Handle to a running channel actor.
///
/// A closed mailbox or a dropped reply means the actor is gone; both
/// surface as [`ChannelError::Draining`].
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    name: Arc<str>,
    instance: u64,
    tx: mpsc::Sender<ChannelEvent>,
}

impl ChannelHandle {
    pub(crate) fn new(name: &str, instance: u64, tx: mpsc::Sender<ChannelEvent>) -> Self {
        Self {
            name: Arc::from(name),
            instance,
            tx,
        }
    }

    /// Display name of the channel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the actor behind this handle.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Submit a command and wait for its result.
    pub async fn execute(&self, actor: PlayerInfo, command: ChannelCommand) -> ChannelResult<Outcome> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(ChannelEvent::Command {
            actor: Box::new(actor),
            command,
            reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| ChannelError::Draining)?
    }

    /// Request a static/dynamic conversion. Returns whether it happened.
    pub async fn set_static(&self, want_static: bool) -> ChannelResult<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(ChannelEvent::SetStatic {
            want_static,
            reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| ChannelError::Draining)?
    }

    pub async fn snapshot(&self) -> ChannelResult<ChannelSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(ChannelEvent::Snapshot { reply_tx }).await?;
        reply_rx.await.map_err(|_| ChannelError::Draining)
    }

    async fn send(&self, event: ChannelEvent) -> ChannelResult<()> {
        self.tx.send(event).await.map_err(|_| ChannelError::Draining)
    }
}
