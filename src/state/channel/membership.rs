//! Join, leave, kick/ban and unban.

use channeld_proto::{ChannelFlags, Notification};

use super::{Channel, Outcome, Report};
use crate::error::{ChannelError, ChannelResult};
use crate::services::PlayerInfo;

/// Flag value of the one channel guild members may not join. Kept as a
/// literal compatibility rule: it is not derived from any flag meaning.
const GUILD_REFUSED_FLAGS: ChannelFlags = ChannelFlags::from_bits(0x38);

impl Channel {
    pub fn join(&mut self, actor: &PlayerInfo, password: Option<&str>) -> ChannelResult<Outcome> {
        if self.members.contains(actor.id) {
            // Built-in channels re-join silently
            let report = if self.is_builtin() {
                Report::Silent
            } else {
                Report::Notify
            };
            return self.fail(actor.id, report, ChannelError::AlreadyMember(actor.id));
        }

        if self.banned.contains(&actor.id) {
            return self.reject(actor.id, ChannelError::Banned);
        }

        if let Some(expected) = &self.password
            && password != Some(expected.as_str())
        {
            return self.reject(actor.id, ChannelError::WrongPassword);
        }

        if actor.guild_id.is_some() && self.flags == GUILD_REFUSED_FLAGS {
            return self.fail(actor.id, Report::Silent, ChannelError::GuildRestricted);
        }

        self.members.insert(actor.id);

        if self.announce && self.policy.announces_presence(actor.security) {
            self.broadcast(Notification::joined(&self.name, actor.id));
        }

        self.dispatch.send_to_one(
            actor.id,
            Notification::you_joined(&self.name, self.flags, self.channel_id),
        );

        if !self.is_public() && self.owner.is_none() {
            let exclaim = self.members.len() > 1;
            self.set_owner(Some(actor.id), exclaim);
        }

        self.convert_static(true, false);
        Ok(Outcome::Applied)
    }

    /// Leave the channel. `notify` controls both the private leave
    /// confirmation and whether a not-member failure is reported.
    pub fn leave(&mut self, actor: &PlayerInfo, notify: bool) -> ChannelResult<Outcome> {
        if !self.members.contains(actor.id) {
            let report = if notify { Report::Notify } else { Report::Silent };
            return self.fail(actor.id, report, ChannelError::NotMember);
        }

        if notify {
            self.dispatch
                .send_to_one(actor.id, Notification::you_left(&self.name));
        }

        let was_owner = self
            .members
            .remove(actor.id)
            .is_some_and(|role| role.owner);

        if self.announce && self.policy.announces_presence(actor.security) {
            self.broadcast(Notification::left(&self.name, actor.id));
        }

        if was_owner && !self.is_public() {
            self.run_succession();
        }
        Ok(Outcome::Applied)
    }

    pub fn kick_or_ban(
        &mut self,
        actor: &PlayerInfo,
        target_name: &str,
        ban: bool,
    ) -> ChannelResult<Outcome> {
        let Some(role) = self.members.role(actor.id) else {
            return self.reject(actor.id, ChannelError::NotMember);
        };
        if !self.policy.can_moderate(role, actor.security) {
            return self.reject(actor.id, ChannelError::NotModerator);
        }

        let target = match self.dispatch.services().directory.find_by_name(target_name) {
            Some(target) if self.members.contains(target.id) => target,
            _ => return self.reject(actor.id, ChannelError::PlayerNotFound(target_name.to_string())),
        };

        if !self.policy.may_act_on_owner(actor, self.owner, target.id) {
            return self.reject(actor.id, ChannelError::NotOwner);
        }
        let was_owner = self.owner == Some(target.id);

        let notice = if ban && self.banned.insert(target.id) {
            Notification::player_banned(&self.name, target.id, actor.id)
        } else {
            Notification::player_kicked(&self.name, target.id, actor.id)
        };
        // The target is still a member here and hears about it
        self.broadcast(notice);
        self.members.remove(target.id);

        if was_owner && !self.is_public() {
            self.run_succession();
        }
        Ok(Outcome::Applied)
    }

    pub fn unban(&mut self, actor: &PlayerInfo, target_name: &str) -> ChannelResult<Outcome> {
        let Some(role) = self.members.role(actor.id) else {
            return self.reject(actor.id, ChannelError::NotMember);
        };
        if !self.policy.can_moderate(role, actor.security) {
            return self.reject(actor.id, ChannelError::NotModerator);
        }

        let Some(target) = self.dispatch.services().directory.find_by_name(target_name) else {
            return self.reject(actor.id, ChannelError::PlayerNotFound(target_name.to_string()));
        };
        if !self.banned.remove(&target.id) {
            return self.reject(actor.id, ChannelError::NotBanned(target_name.to_string()));
        }

        self.broadcast(Notification::player_unbanned(&self.name, target.id, actor.id));
        Ok(Outcome::Applied)
    }
}
