//! Explicit owner transfer and owner queries.

use channeld_proto::{NOBODY, Notification, PLAYER_NOT_FOUND, SecurityLevel};

use super::{Channel, Outcome};
use crate::error::{ChannelError, ChannelResult};
use crate::services::PlayerInfo;

impl Channel {
    /// Hand ownership to a named member. Always exclaimed.
    pub fn change_owner(&mut self, actor: &PlayerInfo, target_name: &str) -> ChannelResult<Outcome> {
        if !self.members.contains(actor.id) {
            return self.reject(actor.id, ChannelError::NotMember);
        }
        if self.is_public() {
            return self.reject(actor.id, ChannelError::NotOwner);
        }
        if !actor.is_game_master() && self.owner != Some(actor.id) {
            return self.reject(actor.id, ChannelError::NotOwner);
        }

        let not_found = || ChannelError::PlayerNotFound(target_name.to_string());
        let target = match self.dispatch.services().directory.find_by_name(target_name) {
            Some(target) if self.members.contains(target.id) => target,
            _ => return self.reject(actor.id, not_found()),
        };
        if !self.policy.factions_compatible(actor, &target) {
            return self.reject(actor.id, not_found());
        }

        self.set_owner(Some(target.id), true);
        Ok(Outcome::Applied)
    }

    /// Reply with the owner's name, masked for plain players who may not
    /// see that owner.
    pub fn query_owner(&self, actor: &PlayerInfo) -> ChannelResult<Outcome> {
        if !self.members.contains(actor.id) {
            return self.reject(actor.id, ChannelError::NotMember);
        }

        let directory = &self.dispatch.services().directory;
        let mut owner = self.owner;
        if actor.security == SecurityLevel::Player
            && let Some(info) = owner.and_then(|id| directory.player(id))
        {
            let visible = directory.is_visible_globally(actor.id, info.id);
            if !self.policy.visible_in_who_list(actor.security, info.security, visible) {
                owner = None;
            }
        }

        let name = match owner {
            None => NOBODY.to_string(),
            Some(id) => directory
                .name_of(id)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| PLAYER_NOT_FOUND.to_string()),
        };
        self.dispatch
            .send_to_one(actor.id, Notification::channel_owner(&self.name, &name));
        Ok(Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::config::CatalogEntry;
    use channeld_proto::{MemberFlags, NoticeBody, NoticeKind, PlayerId, Team};

    fn owner_reply(h: &Harness, player: PlayerId) -> String {
        h.services
            .transport
            .delivered_to(player)
            .iter()
            .rev()
            .find_map(|m| match m.as_notification().map(|n| &n.body) {
                Some(NoticeBody::ChannelOwnerReply { owner_name }) => Some(owner_name.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn transfer_to_member() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();
        h.drain();

        ch.change_owner(&p1, "two").unwrap();
        assert_eq!(ch.owner(), Some(p2.id));
        assert_eq!(ch.members().role(p1.id).unwrap().flags(), MemberFlags::MODERATOR);
        assert_eq!(
            ch.members().role(p2.id).unwrap().flags(),
            MemberFlags::OWNER | MemberFlags::MODERATOR
        );
        assert_eq!(
            h.kinds_for(p1.id),
            vec![NoticeKind::RoleChanged, NoticeKind::RoleChanged, NoticeKind::OwnerChanged]
        );
    }

    #[test]
    fn role_change_notices_name_their_own_member() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();
        h.drain();

        ch.change_owner(&p1, "Two").unwrap();
        let players: Vec<_> = h
            .services
            .transport
            .delivered_to(p1.id)
            .iter()
            .filter_map(|m| match m.as_notification().map(|n| &n.body) {
                Some(NoticeBody::RoleChanged { player, .. }) => Some(*player),
                _ => None,
            })
            .collect();
        assert_eq!(players, vec![p1.id, p2.id]);
    }

    #[test]
    fn transfer_guards() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let owner = h.player(1, "Owner");
        let plain = h.player(2, "Plain");
        let orc = h.player_as(3, "Orc", Team::Horde, SecurityLevel::Player);
        let outsider = h.player(4, "Outsider");
        for p in [&owner, &plain, &orc] {
            ch.join(p, None).unwrap();
        }

        assert_eq!(ch.change_owner(&outsider, "Plain"), Err(ChannelError::NotMember));
        assert_eq!(ch.change_owner(&plain, "Plain"), Err(ChannelError::NotOwner));
        assert_eq!(
            ch.change_owner(&owner, "Outsider"),
            Err(ChannelError::PlayerNotFound("Outsider".into()))
        );
        assert_eq!(
            ch.change_owner(&owner, "Orc"),
            Err(ChannelError::PlayerNotFound("Orc".into()))
        );
        assert_eq!(ch.owner(), Some(owner.id));
    }

    #[test]
    fn game_master_may_transfer() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let owner = h.player(1, "Owner");
        let gm = h.player_as(2, "Gm", Team::Alliance, SecurityLevel::GameMaster);
        ch.join(&owner, None).unwrap();
        ch.join(&gm, None).unwrap();

        assert_eq!(ch.change_owner(&gm, "Gm"), Ok(Outcome::Applied));
        assert_eq!(ch.owner(), Some(gm.id));
    }

    #[test]
    fn public_channels_have_no_owner_to_transfer() {
        let h = Harness::new();
        let mut ch = Channel::builtin(&CatalogEntry::new("General", 1), h.ctx.clone());
        let gm = h.player_as(1, "Gm", Team::Alliance, SecurityLevel::GameMaster);
        ch.join(&gm, None).unwrap();

        assert_eq!(ch.change_owner(&gm, "Gm"), Err(ChannelError::NotOwner));
        assert_eq!(ch.owner(), None);
    }

    #[test]
    fn query_owner_names() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();

        ch.query_owner(&p2).unwrap();
        assert_eq!(owner_reply(&h, p2.id), "One");

        let mut builtin = Channel::builtin(&CatalogEntry::new("General", 1), h.ctx.clone());
        builtin.join(&p2, None).unwrap();
        builtin.query_owner(&p2).unwrap();
        assert_eq!(owner_reply(&h, p2.id), NOBODY);
    }

    #[test]
    fn query_owner_masks_staff_for_players() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let gm = h.player_as(1, "Gm", Team::Alliance, SecurityLevel::GameMaster);
        let plain = h.player(2, "Plain");
        let staff = h.player_as(3, "Staff", Team::Alliance, SecurityLevel::Moderator);
        ch.join(&gm, None).unwrap();
        ch.join(&plain, None).unwrap();
        ch.join(&staff, None).unwrap();

        ch.query_owner(&plain).unwrap();
        assert_eq!(owner_reply(&h, plain.id), NOBODY);
        ch.query_owner(&staff).unwrap();
        assert_eq!(owner_reply(&h, staff.id), "Gm");
    }

    #[test]
    fn query_owner_hidden_and_unresolvable() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();

        h.services.directory.set_hidden(p1.id, true);
        ch.query_owner(&p2).unwrap();
        assert_eq!(owner_reply(&h, p2.id), NOBODY);

        h.services.directory.remove(p1.id);
        ch.query_owner(&p2).unwrap();
        assert_eq!(owner_reply(&h, p2.id), PLAYER_NOT_FOUND);
    }

    #[test]
    fn query_owner_requires_membership() {
        let h = Harness::new();
        let ch = h.custom("test");
        let p1 = h.player(1, "One");
        assert_eq!(ch.query_owner(&p1), Err(ChannelError::NotMember));
    }
}
