//! Integration tests for channel flows: join, kick/ban, speech.

mod common;

use channeld::ChannelError;
use channeld::state::{ChannelCommand, Outcome};
use channeld_proto::{ChannelFlags, MemberFlags, NoticeBody, NoticeKind};
use common::TestRealm;

#[tokio::test]
async fn test_custom_channel_lifecycle_and_ban() {
    let realm = TestRealm::new();
    let p1 = realm.player(1, "One");
    let p2 = realm.player(2, "Two");

    realm.join(&p1, "test").await.unwrap();
    let snap = realm.snapshot("test").await;
    assert_eq!(snap.owner, Some(p1.id));
    assert_eq!(
        snap.member_flags(p1.id),
        Some(MemberFlags::OWNER | MemberFlags::MODERATOR)
    );
    // Single member: no exclaim
    assert!(!realm.kinds_for(&p1).contains(&NoticeKind::OwnerChanged));
    assert_eq!(
        realm.notices_for(&p1)[1],
        NoticeBody::YouJoined {
            flags: ChannelFlags::CUSTOM,
            channel_id: 0,
            split_index: 0
        }
    );

    realm.clear();
    realm.join(&p2, "test").await.unwrap();
    assert_eq!(realm.snapshot("test").await.owner, Some(p1.id));
    assert_eq!(realm.notices_for(&p1), vec![NoticeBody::Joined { player: p2.id }]);
    assert!(realm.notices_for(&p2).contains(&NoticeBody::Joined { player: p2.id }));

    realm.clear();
    realm
        .run(
            &p1,
            "test",
            ChannelCommand::KickOrBan {
                target: "Two".into(),
                ban: true,
            },
        )
        .await
        .unwrap();
    let banned = NoticeBody::PlayerBanned {
        target: p2.id,
        by: p1.id,
    };
    assert_eq!(realm.notices_for(&p1), vec![banned.clone()]);
    assert_eq!(realm.notices_for(&p2), vec![banned]);

    let snap = realm.snapshot("test").await;
    assert!(!snap.is_member(p2.id));
    assert_eq!(snap.banned, vec![p2.id]);

    realm.clear();
    assert_eq!(realm.join(&p2, "test").await, Err(ChannelError::Banned));
    assert_eq!(realm.kinds_for(&p2), vec![NoticeKind::Banned]);
}

#[tokio::test]
async fn test_moderator_speech_and_muting() {
    let realm = TestRealm::new();
    let owner = realm.player(1, "Owner");
    let p2 = realm.player(2, "Two");
    let p3 = realm.player(3, "Three");
    for p in [&owner, &p2, &p3] {
        realm.join(p, "test").await.unwrap();
    }

    realm.clear();
    realm
        .run(&owner, "test", ChannelCommand::say("hello"))
        .await
        .unwrap();
    assert!(realm.chat_for(&owner).is_empty());
    assert_eq!(realm.chat_for(&p2).len(), 1);
    assert_eq!(realm.chat_for(&p3)[0].text, "hello");

    realm
        .run(&owner, "test", ChannelCommand::mute("Two", true))
        .await
        .unwrap();
    realm.clear();

    assert_eq!(
        realm.run(&p2, "test", ChannelCommand::say("let me talk")).await,
        Err(ChannelError::Muted)
    );
    assert_eq!(realm.kinds_for(&p2), vec![NoticeKind::Muted]);
    assert!(realm.chat_for(&owner).is_empty());
    assert!(realm.chat_for(&p3).is_empty());
}

#[tokio::test]
async fn test_sole_owner_self_moderator_is_silent() {
    let realm = TestRealm::new();
    let p1 = realm.player(1, "One");
    realm.join(&p1, "test").await.unwrap();
    let before = realm.snapshot("test").await;
    realm.clear();

    for set in [true, false] {
        assert_eq!(
            realm
                .run(&p1, "test", ChannelCommand::moderator("One", set))
                .await,
            Ok(Outcome::Unchanged)
        );
    }
    assert!(realm.services.transport.is_empty());
    assert_eq!(realm.snapshot("test").await, before);
}

#[tokio::test]
async fn test_owner_leave_runs_succession() {
    let realm = TestRealm::new();
    let a = realm.player(1, "A");
    let b = realm.player(2, "B");
    let c = realm.player(3, "C");
    let d = realm.player(4, "D");
    for p in [&a, &b, &c, &d] {
        realm.join(p, "test").await.unwrap();
    }
    realm
        .run(&a, "test", ChannelCommand::moderator("C", true))
        .await
        .unwrap();

    realm.clear();
    realm
        .run(&a, "test", ChannelCommand::Leave { notify: true })
        .await
        .unwrap();

    let snap = realm.snapshot("test").await;
    assert_eq!(snap.owner, Some(c.id));
    assert_eq!(
        realm.kinds_for(&b),
        vec![
            NoticeKind::Left,
            NoticeKind::RoleChanged,
            NoticeKind::OwnerChanged
        ]
    );
    assert_eq!(realm.kinds_for(&a), vec![NoticeKind::YouLeft]);
}

#[tokio::test]
async fn test_builtin_channels() {
    let realm = TestRealm::new();
    let p1 = realm.player(1, "One");

    realm.join(&p1, "TRADE").await.unwrap();
    let snap = realm.snapshot("trade").await;
    assert_eq!(snap.name, "Trade");
    assert_eq!(snap.channel_id, 2);
    assert_eq!(snap.owner, None);
    assert_eq!(snap.member_flags(p1.id), Some(MemberFlags::NONE));
    // No announcements on built-ins
    assert_eq!(realm.kinds_for(&p1), vec![NoticeKind::YouJoined]);

    realm.clear();
    assert!(matches!(
        realm.join(&p1, "Trade").await,
        Err(ChannelError::AlreadyMember(_))
    ));
    assert!(realm.services.transport.is_empty());

    realm
        .run(&p1, "Trade", ChannelCommand::Leave { notify: true })
        .await
        .unwrap();
    // Built-ins stay registered when empty
    assert!(realm.registry.get("trade").is_some());
}

#[tokio::test]
async fn test_guild_member_cannot_join_guild_recruitment() {
    let realm = TestRealm::new();
    let mut guilded = realm.player(1, "Guilded");
    guilded.guild_id = Some(7);
    realm.services.directory.insert(guilded.clone());

    assert_eq!(
        realm.join(&guilded, "GuildRecruitment").await,
        Err(ChannelError::GuildRestricted)
    );
    assert!(realm.services.transport.is_empty());

    let loner = realm.player(2, "Loner");
    realm.join(&loner, "GuildRecruitment").await.unwrap();
}

#[tokio::test]
async fn test_password_protected_channel() {
    let realm = TestRealm::new();
    let p1 = realm.player(1, "One");
    let p2 = realm.player(2, "Two");
    realm.join(&p1, "secret").await.unwrap();
    realm
        .run(
            &p1,
            "secret",
            ChannelCommand::SetPassword {
                password: "hunter2".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        realm.join(&p2, "secret").await,
        Err(ChannelError::WrongPassword)
    );
    assert_eq!(
        realm.registry.join(&p2, "secret", Some("nope")).await,
        Err(ChannelError::WrongPassword)
    );
    realm
        .registry
        .join(&p2, "secret", Some("hunter2"))
        .await
        .unwrap();
    assert!(realm.snapshot("secret").await.is_member(p2.id));
}

#[tokio::test]
async fn test_ignore_filters_chat_and_invites() {
    let realm = TestRealm::new();
    let p1 = realm.player(1, "One");
    let p2 = realm.player(2, "Two");
    let p3 = realm.player(3, "Three");
    realm.join(&p1, "test").await.unwrap();
    realm.join(&p2, "test").await.unwrap();
    realm.services.social.ignore(p1.id, p2.id);
    realm.services.social.ignore(p3.id, p2.id);

    realm.clear();
    realm.run(&p2, "test", ChannelCommand::say("hi")).await.unwrap();
    assert!(realm.chat_for(&p1).is_empty());
    assert_eq!(realm.chat_for(&p2).len(), 1);

    realm
        .run(&p2, "test", ChannelCommand::Invite { target: "Three".into() })
        .await
        .unwrap();
    assert!(realm.notices_for(&p3).is_empty());
    assert_eq!(
        realm.notices_for(&p2),
        vec![NoticeBody::PlayerInvited {
            name: "Three".into()
        }]
    );
}
