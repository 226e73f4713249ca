//! Permission predicates.
//!
//! A [`PermissionPolicy`] is built once from `[channels]` and shared by
//! every channel. All predicates are pure.

use channeld_proto::{Language, PlayerId, SecurityLevel};

use crate::config::{ChannelsConfig, LanguageRestriction};
use crate::services::PlayerInfo;
use crate::state::catalog::{LOCAL_DEFENSE_ID, WORLD_DEFENSE_ID};
use crate::state::member::MemberRole;

#[derive(Debug, Clone)]
pub struct PermissionPolicy {
    gm_join_silently: bool,
    cross_faction: bool,
    language_restriction: LanguageRestriction,
    static_auto_threshold: usize,
    who_list_level: SecurityLevel,
    local_defense_min_rank: u8,
    world_defense_min_rank: u8,
}

impl PermissionPolicy {
    pub fn from_config(config: &ChannelsConfig) -> Self {
        Self {
            gm_join_silently: config.gm_join_silently,
            cross_faction: config.cross_faction,
            language_restriction: config.language_restriction(),
            static_auto_threshold: config.static_auto_threshold,
            who_list_level: config.who_list_level(),
            local_defense_min_rank: config.local_defense_min_rank,
            world_defense_min_rank: config.world_defense_min_rank,
        }
    }

    /// Whether join/leave of a player at `security` is announced on
    /// channels that announce at all.
    pub fn announces_presence(&self, security: SecurityLevel) -> bool {
        !security.is_game_master() || !self.gm_join_silently
    }

    /// Moderator role or game master security.
    pub fn can_moderate(&self, role: MemberRole, security: SecurityLevel) -> bool {
        role.moderator || security.is_game_master()
    }

    /// Whether `actor` may act on `target` given the current owner.
    ///
    /// The owner can only be acted on by a game master or by themself.
    pub fn may_act_on_owner(
        &self,
        actor: &PlayerInfo,
        owner: Option<PlayerId>,
        target: PlayerId,
    ) -> bool {
        owner != Some(target) || actor.is_game_master() || owner == Some(actor.id)
    }

    pub fn cross_faction(&self) -> bool {
        self.cross_faction
    }

    /// Whether two players may interact through a channel.
    pub fn factions_compatible(&self, a: &PlayerInfo, b: &PlayerInfo) -> bool {
        self.cross_faction || a.team == b.team
    }

    /// Faction rule for role changes: two game masters may always
    /// interact.
    pub fn may_change_role_across(&self, actor: &PlayerInfo, target: &PlayerInfo) -> bool {
        (actor.is_game_master() && target.is_game_master()) || self.factions_compatible(actor, target)
    }

    /// Honor rank gate on the defense channels.
    pub fn speech_rank_ok(&self, channel_id: u32, honor_rank: u8) -> bool {
        match channel_id {
            LOCAL_DEFENSE_ID => honor_rank >= self.local_defense_min_rank,
            WORLD_DEFENSE_ID => honor_rank >= self.world_defense_min_rank,
            _ => true,
        }
    }

    /// Whether speech on a channel must pass the public-message check.
    pub fn language_restricted(&self, builtin: bool, public: bool, realm_restricted: bool) -> bool {
        match self.language_restriction {
            LanguageRestriction::Off => false,
            LanguageRestriction::BuiltIn => builtin,
            LanguageRestriction::PublicRealm => public && realm_restricted,
            LanguageRestriction::All => true,
        }
    }

    /// Language chat is delivered in.
    pub fn chat_language(&self, requested: Language) -> Language {
        if self.cross_faction {
            Language::UNIVERSAL
        } else {
            requested
        }
    }

    /// Whether a plain-player observer sees `target` in owner and list
    /// replies. Staff observers see everyone.
    pub fn visible_in_who_list(
        &self,
        observer: SecurityLevel,
        target: SecurityLevel,
        visible_globally: bool,
    ) -> bool {
        observer != SecurityLevel::Player || (target <= self.who_list_level && visible_globally)
    }

    /// Whether automatic conversion towards `want_static` is allowed at
    /// `members`.
    pub fn auto_static_allowed(&self, want_static: bool, members: usize) -> bool {
        self.static_auto_threshold != 0 && want_static == (members >= self.static_auto_threshold)
    }
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::from_config(&ChannelsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use channeld_proto::Team;

    fn player(id: u64, team: Team, security: SecurityLevel) -> PlayerInfo {
        let mut info = PlayerInfo::new(PlayerId(id), format!("p{id}"), team);
        info.security = security;
        info
    }

    fn policy(f: impl FnOnce(&mut ChannelsConfig)) -> PermissionPolicy {
        let mut config = ChannelsConfig::default();
        f(&mut config);
        PermissionPolicy::from_config(&config)
    }

    #[test]
    fn silent_gm_join() {
        let quiet = policy(|c| c.gm_join_silently = true);
        assert!(quiet.announces_presence(SecurityLevel::Moderator));
        assert!(!quiet.announces_presence(SecurityLevel::GameMaster));
        assert!(PermissionPolicy::default().announces_presence(SecurityLevel::Administrator));
    }

    #[test]
    fn moderation_rights() {
        let p = PermissionPolicy::default();
        let plain = MemberRole::default();
        let moderator = MemberRole {
            moderator: true,
            ..Default::default()
        };
        assert!(!p.can_moderate(plain, SecurityLevel::Moderator));
        assert!(p.can_moderate(plain, SecurityLevel::GameMaster));
        assert!(p.can_moderate(moderator, SecurityLevel::Player));
    }

    #[test]
    fn owner_protection() {
        let p = PermissionPolicy::default();
        let owner = PlayerId(1);
        let actor = player(2, Team::Horde, SecurityLevel::Player);
        let gm = player(3, Team::Horde, SecurityLevel::GameMaster);
        let self_owner = player(1, Team::Horde, SecurityLevel::Player);

        assert!(!p.may_act_on_owner(&actor, Some(owner), owner));
        assert!(p.may_act_on_owner(&gm, Some(owner), owner));
        assert!(p.may_act_on_owner(&self_owner, Some(owner), owner));
        assert!(p.may_act_on_owner(&actor, Some(owner), PlayerId(5)));
        assert!(p.may_act_on_owner(&actor, None, PlayerId(5)));
    }

    #[test]
    fn faction_rules() {
        let p = PermissionPolicy::default();
        let a = player(1, Team::Alliance, SecurityLevel::Player);
        let h = player(2, Team::Horde, SecurityLevel::Player);
        let gm_a = player(3, Team::Alliance, SecurityLevel::GameMaster);
        let gm_h = player(4, Team::Horde, SecurityLevel::Administrator);

        assert!(!p.factions_compatible(&a, &h));
        assert!(!p.may_change_role_across(&gm_a, &h));
        assert!(p.may_change_role_across(&gm_a, &gm_h));

        let open = policy(|c| c.cross_faction = true);
        assert!(open.factions_compatible(&a, &h));
        assert_eq!(open.chat_language(Language(7)), Language::UNIVERSAL);
        assert_eq!(p.chat_language(Language(7)), Language(7));
    }

    #[test]
    fn defense_rank_gates() {
        let p = policy(|c| c.local_defense_min_rank = 2);
        assert!(!p.speech_rank_ok(LOCAL_DEFENSE_ID, 1));
        assert!(p.speech_rank_ok(LOCAL_DEFENSE_ID, 2));
        assert!(!p.speech_rank_ok(WORLD_DEFENSE_ID, 5));
        assert!(p.speech_rank_ok(WORLD_DEFENSE_ID, 6));
        assert!(p.speech_rank_ok(1, 0));
    }

    #[test]
    fn language_modes() {
        let off = PermissionPolicy::default();
        assert!(!off.language_restricted(true, true, true));

        let builtin = policy(|c| c.restricted_language_mode = 1);
        assert!(builtin.language_restricted(true, true, true));
        assert!(!builtin.language_restricted(false, true, true));

        let realm = policy(|c| c.restricted_language_mode = 2);
        assert!(realm.language_restricted(false, true, true));
        assert!(!realm.language_restricted(false, true, false));
        assert!(!realm.language_restricted(false, false, true));

        let all = policy(|c| c.restricted_language_mode = 3);
        assert!(all.language_restricted(false, false, false));
    }

    #[test]
    fn who_list_visibility() {
        let p = PermissionPolicy::default();
        assert!(p.visible_in_who_list(SecurityLevel::Player, SecurityLevel::Player, true));
        assert!(!p.visible_in_who_list(SecurityLevel::Player, SecurityLevel::Moderator, true));
        assert!(!p.visible_in_who_list(SecurityLevel::Player, SecurityLevel::Player, false));
        assert!(p.visible_in_who_list(SecurityLevel::Moderator, SecurityLevel::Administrator, false));

        let lenient = policy(|c| c.gm_level_in_who_list = 2);
        assert!(lenient.visible_in_who_list(SecurityLevel::Player, SecurityLevel::GameMaster, true));
        assert!(!lenient.visible_in_who_list(SecurityLevel::Player, SecurityLevel::Administrator, true));
    }

    #[test]
    fn auto_static_threshold() {
        assert!(!PermissionPolicy::default().auto_static_allowed(true, 1000));

        let p = policy(|c| c.static_auto_threshold = 3);
        assert!(!p.auto_static_allowed(true, 2));
        assert!(p.auto_static_allowed(true, 3));
        assert!(p.auto_static_allowed(false, 2));
        assert!(!p.auto_static_allowed(false, 3));
    }
}
