//! Owner succession and the owner/moderator coupling.

use channeld_proto::PlayerId;

use crate::state::member::{MembershipTable, RoleChange};

/// Succession and transfer rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipPolicy;

impl OwnershipPolicy {
    /// First moderator in join order, else the first member, else nobody.
    pub fn select_successor(table: &MembershipTable) -> Option<PlayerId> {
        table
            .iter()
            .find(|m| m.role.moderator)
            .or_else(|| table.iter().next())
            .map(|m| m.player)
    }

    /// Move ownership from `current` to `next` and return the role changes
    /// in the order they happened.
    ///
    /// The previous owner keeps moderator only when ownership passes to
    /// someone; clearing ownership strips it. The new owner always gains
    /// moderator. Absent members are skipped.
    pub fn transfer(
        table: &mut MembershipTable,
        current: Option<PlayerId>,
        next: Option<PlayerId>,
    ) -> Vec<RoleChange> {
        let mut changes = Vec::with_capacity(2);

        if let Some(old_owner) = current {
            let keep_moderator = next.is_some();
            if let Some(change) = table.update(old_owner, |role| {
                role.moderator = keep_moderator;
                role.owner = false;
            }) {
                changes.push(change);
            }
        }

        if let Some(new_owner) = next
            && let Some(change) = table.update(new_owner, |role| {
                role.moderator = true;
                role.owner = true;
            })
        {
            changes.push(change);
        }

        changes
    }
}
