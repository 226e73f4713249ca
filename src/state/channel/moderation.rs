//! Password, role modes and channel-wide toggles.

use channeld_proto::Notification;

use super::{Channel, Outcome, RoleMode};
use crate::error::{ChannelError, ChannelResult};
use crate::services::PlayerInfo;

impl Channel {
    /// Gate shared by every moderator command.
    fn require_moderator(&self, actor: &PlayerInfo) -> ChannelResult<()> {
        let Some(role) = self.members.role(actor.id) else {
            return self.reject(actor.id, ChannelError::NotMember);
        };
        if !self.policy.can_moderate(role, actor.security) {
            return self.reject(actor.id, ChannelError::NotModerator);
        }
        Ok(())
    }

    /// Set or clear (empty string) the join password.
    pub fn set_password(&mut self, actor: &PlayerInfo, password: &str) -> ChannelResult<Outcome> {
        self.require_moderator(actor)?;
        if self.is_builtin() {
            return self.reject(actor.id, ChannelError::NotModerator);
        }

        self.password = (!password.is_empty()).then(|| password.to_string());
        self.broadcast(Notification::password_changed(&self.name, actor.id));
        Ok(Outcome::Applied)
    }

    /// Grant or revoke moderator or mute on a member.
    pub fn set_mode(
        &mut self,
        actor: &PlayerInfo,
        target_name: &str,
        mode: RoleMode,
        set: bool,
    ) -> ChannelResult<Outcome> {
        self.require_moderator(actor)?;

        let not_found = || ChannelError::PlayerNotFound(target_name.to_string());
        let Some(target) = self.dispatch.services().directory.find_by_name(target_name) else {
            return self.reject(actor.id, not_found());
        };

        // The owner toggling their own moderator bit changes nothing
        if mode == RoleMode::Moderator
            && self.owner == Some(actor.id)
            && self.owner == Some(target.id)
        {
            return Ok(Outcome::Unchanged);
        }

        if !self.members.contains(target.id) {
            return self.reject(actor.id, not_found());
        }

        // Faction denials look exactly like absence
        if !self.policy.may_change_role_across(actor, &target) {
            return self.reject(actor.id, not_found());
        }

        if self.owner == Some(target.id) && self.owner != Some(actor.id) {
            return self.reject(actor.id, ChannelError::NotOwner);
        }

        let change = self.members.update(target.id, |role| match mode {
            RoleMode::Moderator => role.moderator = set,
            RoleMode::Mute => role.muted = set,
        });
        match change {
            Some(change) => {
                self.broadcast_role_change(change);
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    pub fn toggle_announce(&mut self, actor: &PlayerInfo) -> ChannelResult<Outcome> {
        self.require_moderator(actor)?;

        self.announce = !self.announce;
        let notice = if self.announce {
            Notification::announcements_on(&self.name, Some(actor.id))
        } else {
            Notification::announcements_off(&self.name, Some(actor.id))
        };
        self.broadcast(notice);
        Ok(Outcome::Applied)
    }

    pub fn toggle_moderate(&mut self, actor: &PlayerInfo) -> ChannelResult<Outcome> {
        self.require_moderator(actor)?;

        self.moderate = !self.moderate;
        let notice = if self.moderate {
            Notification::moderation_on(&self.name, Some(actor.id))
        } else {
            Notification::moderation_off(&self.name, Some(actor.id))
        };
        self.broadcast(notice);
        Ok(Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;
    use crate::config::{CatalogEntry, ChannelsConfig};
    use crate::state::policy::PermissionPolicy;
    use channeld_proto::{MemberFlags, NoticeBody, NoticeKind, SecurityLevel, Team};

    #[test]
    fn owner_self_moderator_toggle_is_silent_noop() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        ch.join(&p1, None).unwrap();
        let before = ch.snapshot();
        h.drain();

        assert_eq!(ch.set_mode(&p1, "One", RoleMode::Moderator, true), Ok(Outcome::Unchanged));
        assert_eq!(ch.set_mode(&p1, "One", RoleMode::Moderator, false), Ok(Outcome::Unchanged));
        assert!(h.drain().is_empty());
        assert_eq!(ch.snapshot(), before);
    }

    #[test]
    fn grant_and_revoke_moderator() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();
        h.drain();

        ch.set_mode(&p1, "Two", RoleMode::Moderator, true).unwrap();
        let log = h.drain();
        assert_eq!(log.len(), 2);
        assert_eq!(
            log[0].1.as_notification().map(|n| n.body.clone()),
            Some(NoticeBody::RoleChanged {
                player: p2.id,
                old: MemberFlags::NONE,
                new: MemberFlags::MODERATOR
            })
        );

        // Repeating the grant changes nothing and says nothing
        assert_eq!(ch.set_mode(&p1, "Two", RoleMode::Moderator, true), Ok(Outcome::Unchanged));
        assert!(h.drain().is_empty());

        ch.set_mode(&p1, "Two", RoleMode::Moderator, false).unwrap();
        assert_eq!(ch.members().role(p2.id).unwrap().flags(), MemberFlags::NONE);
    }

    #[test]
    fn mute_sets_mute_bit() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();

        ch.set_mode(&p1, "two", RoleMode::Mute, true).unwrap();
        assert!(ch.members().role(p2.id).unwrap().muted);
    }

    #[test]
    fn only_owner_changes_owner_flags() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let owner = h.player(1, "Owner");
        let modr = h.player(2, "Mod");
        let gm = h.player_as(3, "Gm", Team::Alliance, SecurityLevel::GameMaster);
        for p in [&owner, &modr, &gm] {
            ch.join(p, None).unwrap();
        }
        ch.set_mode(&owner, "Mod", RoleMode::Moderator, true).unwrap();
        h.drain();

        assert_eq!(ch.set_mode(&modr, "Owner", RoleMode::Mute, true), Err(ChannelError::NotOwner));
        assert_eq!(ch.set_mode(&gm, "Owner", RoleMode::Moderator, false), Err(ChannelError::NotOwner));
        assert_eq!(h.kinds_for(gm.id), vec![NoticeKind::NotOwner]);
        // The owner may mute themself
        assert_eq!(ch.set_mode(&owner, "Owner", RoleMode::Mute, true), Ok(Outcome::Applied));
    }

    #[test]
    fn faction_mismatch_reads_as_not_found() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let owner = h.player(1, "Owner");
        let horde = h.player_as(2, "Orc", Team::Horde, SecurityLevel::Player);
        ch.join(&owner, None).unwrap();
        ch.join(&horde, None).unwrap();
        h.drain();

        assert_eq!(
            ch.set_mode(&owner, "Orc", RoleMode::Moderator, true),
            Err(ChannelError::PlayerNotFound("Orc".into()))
        );
        assert_eq!(h.kinds_for(owner.id), vec![NoticeKind::PlayerNotFound]);
    }

    #[test]
    fn two_game_masters_cross_factions() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let gm_a = h.player_as(1, "GmA", Team::Alliance, SecurityLevel::GameMaster);
        let gm_h = h.player_as(2, "GmH", Team::Horde, SecurityLevel::GameMaster);
        ch.join(&gm_a, None).unwrap();
        ch.join(&gm_h, None).unwrap();

        assert_eq!(ch.set_mode(&gm_a, "GmH", RoleMode::Moderator, true), Ok(Outcome::Applied));
    }

    #[test]
    fn cross_faction_config_allows_role_changes() {
        let mut config = ChannelsConfig::default();
        config.cross_faction = true;
        let h = Harness::with_policy(PermissionPolicy::from_config(&config));
        let mut ch = h.custom("test");
        let owner = h.player(1, "Owner");
        let horde = h.player_as(2, "Orc", Team::Horde, SecurityLevel::Player);
        ch.join(&owner, None).unwrap();
        ch.join(&horde, None).unwrap();

        assert_eq!(ch.set_mode(&owner, "Orc", RoleMode::Mute, true), Ok(Outcome::Applied));
    }

    #[test]
    fn set_mode_guards() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let owner = h.player(1, "Owner");
        let plain = h.player(2, "Plain");
        let outsider = h.player(3, "Outsider");
        ch.join(&owner, None).unwrap();
        ch.join(&plain, None).unwrap();

        assert_eq!(
            ch.set_mode(&outsider, "Plain", RoleMode::Mute, true),
            Err(ChannelError::NotMember)
        );
        assert_eq!(
            ch.set_mode(&plain, "Owner", RoleMode::Mute, true),
            Err(ChannelError::NotModerator)
        );
        assert_eq!(
            ch.set_mode(&owner, "Outsider", RoleMode::Mute, true),
            Err(ChannelError::PlayerNotFound("Outsider".into()))
        );
        assert_eq!(
            ch.set_mode(&owner, "Nobody", RoleMode::Mute, true),
            Err(ChannelError::PlayerNotFound("Nobody".into()))
        );
    }

    #[test]
    fn password_set_and_clear() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        let p2 = h.player(2, "Two");
        ch.join(&p1, None).unwrap();
        ch.join(&p2, None).unwrap();
        h.drain();

        assert_eq!(ch.set_password(&p2, "x"), Err(ChannelError::NotModerator));
        ch.set_password(&p1, "x").unwrap();
        assert!(ch.snapshot().has_password);
        assert_eq!(h.kinds_for(p2.id), vec![NoticeKind::NotModerator, NoticeKind::PasswordChanged]);

        ch.set_password(&p1, "").unwrap();
        assert!(!ch.snapshot().has_password);
    }

    #[test]
    fn builtin_channels_refuse_passwords() {
        let h = Harness::new();
        let mut ch = Channel::builtin(&CatalogEntry::new("General", 1), h.ctx.clone());
        let gm = h.player_as(1, "Gm", Team::Alliance, SecurityLevel::GameMaster);
        ch.join(&gm, None).unwrap();

        assert_eq!(ch.set_password(&gm, "x"), Err(ChannelError::NotModerator));
        assert!(!ch.snapshot().has_password);
    }

    #[test]
    fn toggles_flip_and_name_the_actor() {
        let h = Harness::new();
        let mut ch = h.custom("test");
        let p1 = h.player(1, "One");
        ch.join(&p1, None).unwrap();
        h.drain();

        ch.toggle_announce(&p1).unwrap();
        ch.toggle_moderate(&p1).unwrap();
        ch.toggle_moderate(&p1).unwrap();
        let snap = ch.snapshot();
        assert!(!snap.announce);
        assert!(!snap.moderate);

        let bodies: Vec<_> = h
            .drain()
            .into_iter()
            .filter_map(|(_, m)| m.as_notification().map(|n| n.body.clone()))
            .collect();
        assert_eq!(
            bodies,
            vec![
                NoticeBody::AnnouncementsOff { by: Some(p1.id) },
                NoticeBody::ModerationOn { by: Some(p1.id) },
                NoticeBody::ModerationOff { by: Some(p1.id) },
            ]
        );
    }
}
