use tokio::sync::oneshot;

use crate::error::ChannelResult;
use crate::services::PlayerInfo;
use crate::state::channel::{ChannelCommand, ChannelSnapshot, Outcome};

/// Events that can be sent to a Channel Actor.
#[derive(Debug)]
pub enum ChannelEvent {
    /// A player command.
    Command {
        actor: Box<PlayerInfo>,
        command: ChannelCommand,
        reply_tx: oneshot::Sender<ChannelResult<Outcome>>,
    },
    /// Administrative static/dynamic conversion.
    SetStatic {
        want_static: bool,
        reply_tx: oneshot::Sender<ChannelResult<bool>>,
    },
    /// Request a point-in-time view of the channel.
    Snapshot {
        reply_tx: oneshot::Sender<ChannelSnapshot>,
    },
}

impl ChannelEvent {
    pub(super) fn label(&self) -> &'static str {
        match self {
            Self::Command { command, .. } => command.name(),
            Self::SetStatic { .. } => "set_static",
            Self::Snapshot { .. } => "snapshot",
        }
    }
}
