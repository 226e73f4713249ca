//! Speech, invitations and member lists.

use channeld_proto::{ChannelList, ChatLine, Language, ListedMember, Notification, SecurityLevel};

use super::{Channel, Outcome};
use crate::error::{ChannelError, ChannelResult};
use crate::services::PlayerInfo;

impl Channel {
    /// Speak on the channel. Empty text is ignored.
    pub fn say(&mut self, actor: &PlayerInfo, text: &str, language: Language) -> ChannelResult<Outcome> {
        if text.is_empty() {
            return Ok(Outcome::Unchanged);
        }

        let Some(role) = self.members.role(actor.id) else {
            return self.reject(actor.id, ChannelError::NotMember);
        };

        if !self.throttle.check(actor.id) {
            return self.reject(actor.id, ChannelError::Throttled);
        }

        if role.muted || !self.policy.speech_rank_ok(self.channel_id, actor.honor_rank) {
            return self.reject(actor.id, ChannelError::Muted);
        }

        if self.moderate && !role.moderator && !actor.is_game_master() {
            return self.reject(actor.id, ChannelError::NotModerator);
        }

        let restricted =
            self.policy
                .language_restricted(self.is_builtin(), self.is_public(), self.realm_restricted);
        if restricted
            && !self
                .dispatch
                .services()
                .language
                .check_public_message_language(text)
        {
            return self.reject(actor.id, ChannelError::Muted);
        }

        let line = ChatLine {
            channel: self.name.clone(),
            sender: actor.id,
            sender_name: actor.name.clone(),
            text: text.to_string(),
            language: self.policy.chat_language(language),
            honor_rank: actor.honor_rank,
        };
        // Moderators do not hear their own speech echoed
        let exclude = role.moderator.then_some(actor.id);
        self.dispatch.send_chat(&self.members, line, exclude);
        Ok(Outcome::Applied)
    }

    pub fn invite(&self, actor: &PlayerInfo, target_name: &str) -> ChannelResult<Outcome> {
        if !self.members.contains(actor.id) {
            return self.reject(actor.id, ChannelError::NotMember);
        }

        let services = self.dispatch.services();
        let Some(target) = services.directory.find_by_name(target_name) else {
            return self.reject(actor.id, ChannelError::PlayerNotFound(target_name.to_string()));
        };
        if self.members.contains(target.id) {
            return self.reject(actor.id, ChannelError::AlreadyMember(target.id));
        }
        if self.banned.contains(&target.id) {
            return self.reject(actor.id, ChannelError::InviteBanned(target_name.to_string()));
        }
        if !self.policy.factions_compatible(actor, &target) {
            return self.reject(actor.id, ChannelError::InviteWrongFaction);
        }

        if !services.social.has_ignore(target.id, actor.id) {
            self.dispatch
                .send_to_one(target.id, Notification::invite(&self.name, actor.id));
        }
        self.dispatch
            .send_to_one(actor.id, Notification::player_invited(&self.name, target_name));
        Ok(Outcome::Applied)
    }

    /// Send the member list. Plain players only see members that pass the
    /// who-list visibility rule.
    pub fn list(&self, actor: &PlayerInfo) -> ChannelResult<Outcome> {
        if !self.members.contains(actor.id) {
            return self.reject(actor.id, ChannelError::NotMember);
        }

        let directory = &self.dispatch.services().directory;
        let check = actor.security == SecurityLevel::Player;
        let members = self
            .members
            .iter()
            .filter_map(|member| {
                let info = directory.player(member.player)?;
                if check {
                    let visible = directory.is_visible_globally(actor.id, info.id);
                    if !self.policy.visible_in_who_list(actor.security, info.security, visible) {
                        return None;
                    }
                }
                Some(ListedMember {
                    player: member.player,
                    flags: member.role.flags(),
                })
            })
            .collect();

        self.dispatch.send_to_one(
            actor.id,
            ChannelList {
                channel: self.name.clone(),
                flags: self.flags,
                members,
            },
        );
        Ok(Outcome::Applied)
    }
}
