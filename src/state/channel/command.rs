//! The command surface of a channel.

use channeld_proto::Language;

use super::{Channel, Outcome, Report};
use crate::error::ChannelResult;
use crate::services::PlayerInfo;
use crate::telemetry::{CommandTimer, spans};

/// Role bit addressed by a mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMode {
    Moderator,
    Mute,
}

/// A request a player makes against one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCommand {
    Join { password: Option<String> },
    Leave { notify: bool },
    KickOrBan { target: String, ban: bool },
    UnBan { target: String },
    SetPassword { password: String },
    SetMode { target: String, mode: RoleMode, set: bool },
    SetOwner { target: String },
    QueryOwner,
    List,
    ToggleAnnounce,
    ToggleModerate,
    Say { text: String, language: Language },
    Invite { target: String },
}

impl ChannelCommand {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::KickOrBan { ban: false, .. } => "kick",
            Self::KickOrBan { ban: true, .. } => "ban",
            Self::UnBan { .. } => "unban",
            Self::SetPassword { .. } => "password",
            Self::SetMode {
                mode: RoleMode::Moderator,
                ..
            } => "moderator",
            Self::SetMode {
                mode: RoleMode::Mute,
                ..
            } => "mute",
            Self::SetOwner { .. } => "owner",
            Self::QueryOwner => "query_owner",
            Self::List => "list",
            Self::ToggleAnnounce => "announce",
            Self::ToggleModerate => "moderate",
            Self::Say { .. } => "say",
            Self::Invite { .. } => "invite",
        }
    }

    /// Whether a not-member failure of this command reaches the actor.
    /// Only a quiet leave keeps it to itself.
    pub fn failure_report(&self) -> Report {
        match self {
            Self::Leave { notify: false } => Report::Silent,
            _ => Report::Notify,
        }
    }

    pub fn moderator(target: impl Into<String>, set: bool) -> Self {
        Self::SetMode {
            target: target.into(),
            mode: RoleMode::Moderator,
            set,
        }
    }

    pub fn mute(target: impl Into<String>, set: bool) -> Self {
        Self::SetMode {
            target: target.into(),
            mode: RoleMode::Mute,
            set,
        }
    }

    pub fn say(text: impl Into<String>) -> Self {
        Self::Say {
            text: text.into(),
            language: Language::UNIVERSAL,
        }
    }
}

impl Channel {
    /// Run one command to completion, notifications included.
    pub fn execute(&mut self, actor: &PlayerInfo, command: ChannelCommand) -> ChannelResult<Outcome> {
        let label = command.name();
        let span = spans::command(label, Some(actor.id), &self.name);
        let _enter = span.enter();
        let _timer = CommandTimer::new(label);

        let result = match command {
            ChannelCommand::Join { password } => self.join(actor, password.as_deref()),
            ChannelCommand::Leave { notify } => self.leave(actor, notify),
            ChannelCommand::KickOrBan { target, ban } => self.kick_or_ban(actor, &target, ban),
            ChannelCommand::UnBan { target } => self.unban(actor, &target),
            ChannelCommand::SetPassword { password } => self.set_password(actor, &password),
            ChannelCommand::SetMode { target, mode, set } => self.set_mode(actor, &target, mode, set),
            ChannelCommand::SetOwner { target } => self.change_owner(actor, &target),
            ChannelCommand::QueryOwner => self.query_owner(actor),
            ChannelCommand::List => self.list(actor),
            ChannelCommand::ToggleAnnounce => self.toggle_announce(actor),
            ChannelCommand::ToggleModerate => self.toggle_moderate(actor),
            ChannelCommand::Say { text, language } => self.say(actor, &text, language),
            ChannelCommand::Invite { target } => self.invite(actor, &target),
        };

        if let Err(err) = &result {
            crate::metrics::record_command_error(label, err.error_code());
        }
        result
    }
}
