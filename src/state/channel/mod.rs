//! The channel state machine.
//!
//! A [`Channel`] owns its membership table, ban set and scalar flags.
//! Commands run synchronously against it: validate through the
//! [`PermissionPolicy`], mutate, then deliver notifications through
//! [`ChannelDispatch`] before returning. The actor in `state::actor` is
//! what serializes commands against one channel.
//!
//! Command handlers live in submodules by area:
//! - [`membership`]: join, leave, kick/ban, unban
//! - [`moderation`]: password, role modes, announce/moderate toggles
//! - [`ownership`]: explicit owner transfer and owner queries
//! - [`speech`]: say, invite, member lists
//! - [`conversion`]: static/dynamic conversion
//! - [`command`]: the [`ChannelCommand`] surface

use std::collections::HashSet;
use std::sync::Arc;

use channeld_proto::{ChannelFlags, MemberFlags, Notification, PlayerId};
use tracing::debug;

use crate::config::CatalogEntry;
use crate::error::{ChannelError, ChannelResult};
use crate::security::SpeechThrottle;
use crate::services::Collaborators;
use crate::state::catalog::builtin_flags;
use crate::state::dispatch::ChannelDispatch;
use crate::state::member::{MembershipTable, RoleChange};
use crate::state::policy::{OwnershipPolicy, PermissionPolicy};

mod command;
mod conversion;
mod membership;
mod moderation;
mod ownership;
mod speech;

pub use command::{ChannelCommand, RoleMode};

/// Shared dependencies handed to every channel.
#[derive(Debug, Clone)]
pub struct ChannelContext {
    pub policy: Arc<PermissionPolicy>,
    pub services: Collaborators,
    pub throttle: Arc<SpeechThrottle>,
}

/// Whether a failure is reported to the acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Notify,
    Silent,
}

/// Result of a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed or output was produced.
    Applied,
    /// Accepted, but nothing happened.
    Unchanged,
}

/// Point-in-time view of a channel, for inspection and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub name: String,
    pub channel_id: u32,
    pub flags: ChannelFlags,
    pub owner: Option<PlayerId>,
    /// Members in join order.
    pub members: Vec<(PlayerId, MemberFlags)>,
    /// Banned players, sorted.
    pub banned: Vec<PlayerId>,
    pub has_password: bool,
    pub announce: bool,
    pub moderate: bool,
    pub is_static: bool,
    pub realm_restricted: bool,
}

impl ChannelSnapshot {
    pub fn member_flags(&self, player: PlayerId) -> Option<MemberFlags> {
        self.members
            .iter()
            .find(|(p, _)| *p == player)
            .map(|(_, f)| *f)
    }

    pub fn is_member(&self, player: PlayerId) -> bool {
        self.member_flags(player).is_some()
    }
}

pub struct Channel {
    name: String,
    channel_id: u32,
    flags: ChannelFlags,
    password: Option<String>,
    announce: bool,
    moderate: bool,
    is_static: bool,
    realm_restricted: bool,
    owner: Option<PlayerId>,
    banned: HashSet<PlayerId>,
    members: MembershipTable,
    policy: Arc<PermissionPolicy>,
    dispatch: ChannelDispatch,
    throttle: Arc<SpeechThrottle>,
}

impl Channel {
    fn with_context(name: String, channel_id: u32, flags: ChannelFlags, ctx: ChannelContext) -> Self {
        Self {
            name,
            channel_id,
            flags,
            password: None,
            announce: true,
            moderate: false,
            is_static: false,
            realm_restricted: false,
            owner: None,
            banned: HashSet::new(),
            members: MembershipTable::new(),
            policy: ctx.policy,
            dispatch: ChannelDispatch::new(ctx.services),
            throttle: ctx.throttle,
        }
    }

    /// A built-in channel from its catalog entry.
    pub fn builtin(entry: &CatalogEntry, ctx: ChannelContext) -> Self {
        let mut channel = Self::with_context(entry.name.clone(), entry.id, builtin_flags(entry), ctx);
        channel.announce = false;
        channel.realm_restricted = true;
        channel
    }

    /// A user-created channel.
    pub fn custom(name: impl Into<String>, ctx: ChannelContext) -> Self {
        let name = name.into();
        let realm_restricted = ctx
            .services
            .language
            .check_public_message_language(&name);
        let mut channel = Self::with_context(name, 0, ChannelFlags::CUSTOM, ctx);
        channel.realm_restricted = realm_restricted;
        channel
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channel_id(&self) -> u32 {
        self.channel_id
    }

    pub fn flags(&self) -> ChannelFlags {
        self.flags
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn members(&self) -> &MembershipTable {
        &self.members
    }

    pub fn is_banned(&self, player: PlayerId) -> bool {
        self.banned.contains(&player)
    }

    /// Built-in channels come from the catalog and never change class.
    pub fn is_builtin(&self) -> bool {
        self.channel_id != 0
    }

    /// Public channels have no owner: built-in or static.
    pub fn is_public(&self) -> bool {
        self.is_builtin() || self.is_static
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// A custom dynamic channel with nobody left in it.
    pub fn is_disposable(&self) -> bool {
        !self.is_public() && self.members.is_empty()
    }

    pub fn snapshot(&self) -> ChannelSnapshot {
        let mut banned: Vec<_> = self.banned.iter().copied().collect();
        banned.sort_unstable();
        ChannelSnapshot {
            name: self.name.clone(),
            channel_id: self.channel_id,
            flags: self.flags,
            owner: self.owner,
            members: self
                .members
                .iter()
                .map(|m| (m.player, m.role.flags()))
                .collect(),
            banned,
            has_password: self.password.is_some(),
            announce: self.announce,
            moderate: self.moderate,
            is_static: self.is_static,
            realm_restricted: self.realm_restricted,
        }
    }

    // ------------------------------------------------------------------
    // Helpers shared by the command handlers
    // ------------------------------------------------------------------

    /// Fail a command, delivering the error notice when `report` says so.
    fn fail<T>(&self, actor: PlayerId, report: Report, err: ChannelError) -> ChannelResult<T> {
        debug!(
            channel = %self.name,
            actor = %actor,
            error = err.error_code(),
            reported = report == Report::Notify,
            "command rejected"
        );
        if report == Report::Notify
            && let Some(notice) = err.to_notification(&self.name)
        {
            self.dispatch.send_to_one(actor, notice);
        }
        Err(err)
    }

    /// Fail a command and tell the actor why.
    fn reject<T>(&self, actor: PlayerId, err: ChannelError) -> ChannelResult<T> {
        self.fail(actor, Report::Notify, err)
    }

    fn broadcast(&self, notice: Notification) {
        self.dispatch.send_to_all(&self.members, notice);
    }

    fn broadcast_role_change(&self, change: RoleChange) {
        self.broadcast(Notification::mode_change(
            &self.name,
            change.player,
            change.old,
            change.new,
        ));
    }

    /// Move ownership to `next` (or clear it), announcing every role
    /// change and, with `exclaim`, the ownership change itself.
    fn set_owner(&mut self, next: Option<PlayerId>, exclaim: bool) {
        let changes = OwnershipPolicy::transfer(&mut self.members, self.owner, next);
        self.owner = next;
        for change in changes {
            self.broadcast_role_change(change);
        }
        if exclaim {
            self.broadcast(Notification::owner_changed(&self.name, next));
        }
    }

    /// Hand ownership to the succession pick.
    fn run_succession(&mut self) {
        let next = OwnershipPolicy::select_successor(&self.members);
        let exclaim = self.members.len() > 1;
        self.set_owner(next, exclaim);
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("channel_id", &self.channel_id)
            .field("flags", &self.flags)
            .field("owner", &self.owner)
            .field("members", &self.members.len())
            .field("static", &self.is_static)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::state::catalog::default_catalog;

    #[test]
    fn custom_channel_defaults() {
        let h = Harness::new();
        let channel = h.custom("Roleplay");
        let snap = channel.snapshot();
        assert_eq!(snap.flags, ChannelFlags::CUSTOM);
        assert_eq!(snap.channel_id, 0);
        assert!(snap.announce);
        assert!(!snap.moderate);
        assert!(snap.realm_restricted);
        assert!(!channel.is_public());
        assert!(channel.is_disposable());
    }

    #[test]
    fn non_ascii_custom_name_is_not_realm_restricted() {
        let h = Harness::new();
        assert!(!h.custom("Café").snapshot().realm_restricted);
    }

    #[test]
    fn builtin_channel_defaults() {
        let h = Harness::new();
        let catalog = default_catalog();
        let channel = Channel::builtin(&catalog[1], h.ctx.clone());
        let snap = channel.snapshot();
        assert_eq!(snap.name, "Trade");
        assert_eq!(snap.channel_id, 2);
        assert!(!snap.announce);
        assert!(snap.realm_restricted);
        assert!(channel.is_public());
        assert!(!channel.is_disposable());
    }
}
