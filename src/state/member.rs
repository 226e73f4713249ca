//! Membership table and member roles.
//!
//! Roles are named booleans. They become a [`MemberFlags`] byte only when a
//! notification or list reply needs one.

use channeld_proto::{MemberFlags, PlayerId};

/// Role state of one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberRole {
    pub owner: bool,
    pub moderator: bool,
    pub muted: bool,
}

impl MemberRole {
    /// Encoded role byte.
    pub fn flags(&self) -> MemberFlags {
        MemberFlags::from_roles(self.owner, self.moderator, self.muted)
    }
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub player: PlayerId,
    pub role: MemberRole,
}

/// A role transition to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    pub player: PlayerId,
    pub old: MemberFlags,
    pub new: MemberFlags,
}

/// Members of one channel, in join order.
///
/// Join order is what succession walks, so rows are kept in a `Vec` rather
/// than a hash map. Channels are small enough that linear lookup wins.
#[derive(Debug, Clone, Default)]
pub struct MembershipTable {
    members: Vec<Member>,
}

impl MembershipTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `player` with no role. Returns `false` if already present.
    pub fn insert(&mut self, player: PlayerId) -> bool {
        if self.contains(player) {
            return false;
        }
        self.members.push(Member {
            player,
            role: MemberRole::default(),
        });
        true
    }

    /// Remove `player`, returning the role they held.
    pub fn remove(&mut self, player: PlayerId) -> Option<MemberRole> {
        let idx = self.members.iter().position(|m| m.player == player)?;
        Some(self.members.remove(idx).role)
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.members.iter().any(|m| m.player == player)
    }

    pub fn role(&self, player: PlayerId) -> Option<MemberRole> {
        self.members
            .iter()
            .find(|m| m.player == player)
            .map(|m| m.role)
    }

    pub(crate) fn role_mut(&mut self, player: PlayerId) -> Option<&mut MemberRole> {
        self.members
            .iter_mut()
            .find(|m| m.player == player)
            .map(|m| &mut m.role)
    }

    /// Apply `f` to a member's role and report the transition if the
    /// encoded flags changed.
    pub(crate) fn update(
        &mut self,
        player: PlayerId,
        f: impl FnOnce(&mut MemberRole),
    ) -> Option<RoleChange> {
        let role = self.role_mut(player)?;
        let old = role.flags();
        f(role);
        let new = role.flags();
        (old != new).then_some(RoleChange { player, old, new })
    }

    /// Clear the moderator bit on every member without reporting.
    pub(crate) fn strip_moderators(&mut self) {
        for member in &mut self.members {
            member.role.moderator = false;
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.members.iter().map(|m| m.player)
    }
}
