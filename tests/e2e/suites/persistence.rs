//! 快照持久化与重启恢复

use creator_core::models::{Screen, Section};
use creator_shared::events::EngagementType;

use crate::helpers::assert_profile_consistent;
use crate::setup::TestEnvironment;

#[test]
fn test_restart_restores_full_session() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.skip_welcome();
    store.apply_engagement_event(&EngagementType::Like, "1");
    store.apply_engagement_event(&EngagementType::Like, "1");
    store.add_course_from_upload("Live Q&A.mov");
    store.show_section(Section::Students);
    let id = store.notifications()[0].id.clone();
    store.mark_notification_read(&id).unwrap();

    let restored = env.reopen();
    assert_eq!(restored.snapshot(), store.snapshot());
    assert_eq!(restored.screen(), Screen::Dashboard);
    assert_eq!(restored.section(), Section::Students);
    assert_eq!(restored.user().converted_students, 3);
    assert!(!restored.notifications()[0].unread);
    assert_profile_consistent(&restored);
}

#[test]
fn test_restart_keeps_counting_toward_threshold() {
    let env = TestEnvironment::new();
    {
        let mut store = env.store();
        for _ in 0..7 {
            store.apply_engagement_event(&EngagementType::Comment, "f1");
        }
    }

    let mut store = env.reopen();
    assert_eq!(store.follower("f1").unwrap().engagements, 7);
    for _ in 0..2 {
        assert!(!store.apply_engagement_event(&EngagementType::Like, "f1").converted());
    }
    assert!(store.apply_engagement_event(&EngagementType::Like, "f1").converted());

    // 恢复后再次达到阈值不会重复转化
    let mut again = env.reopen();
    assert!(!again.apply_engagement_event(&EngagementType::Like, "f1").converted());
    assert_eq!(again.user().converted_students, 1);
    assert_eq!(again.reward_history().len(), 1);
}

#[test]
fn test_welcome_screen_is_not_restored() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.apply_engagement_event(&EngagementType::Share, "f1");
    assert_eq!(store.screen(), Screen::Welcome);

    let restored = env.reopen();
    assert_eq!(restored.screen(), Screen::Welcome);
    assert_eq!(restored.section(), Section::Dashboard);
    assert_eq!(restored.user().total_engagements, 1);
}

#[test]
fn test_corrupt_snapshot_keeps_defaults() {
    let env = TestEnvironment::new();
    std::fs::write(env.snapshot_path(), "{ not json").unwrap();

    let mut store = env.store();
    assert!(!store.load());
    assert!(store.try_load().is_err());
    assert_eq!(store.user().total_engagements, 0);
    assert!(store.ledger().is_empty());
}

#[test]
fn test_partial_snapshot_merges_user_fields() {
    let env = TestEnvironment::new();
    std::fs::write(
        env.snapshot_path(),
        r#"{
            "user": {"followers": 1500, "name": "Partial"},
            "followerEngagements": [["z", {"name": "Zed", "avatar": "Z", "engagements": 4, "isStudent": false}]],
            "currentScreen": "dashboard"
        }"#,
    )
    .unwrap();

    let mut store = env.store();
    assert!(store.load());
    assert_eq!(store.user().followers, 1500);
    assert_eq!(store.user().name, "Partial");
    // 快照中缺失的字段保持当前值
    assert!(store.user().face_verification_enabled);
    assert_eq!(store.follower("z").unwrap().engagements, 4);
    assert!(store.courses().is_empty());
    assert_eq!(store.screen(), Screen::Dashboard);
    assert_eq!(store.section(), Section::Dashboard);
}

#[test]
fn test_deferred_store_flushes_once() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    for i in 0..30 {
        store.apply_engagement_event(&EngagementType::Like, &format!("f{}", i % 4));
    }
    assert!(!env.snapshot_path().exists());
    assert!(store.save_if_dirty());
    assert!(!store.save_if_dirty());

    let restored = env.reopen();
    assert_eq!(restored.user().total_engagements, 30);
    let ids: Vec<&str> = restored.ledger().iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["f0", "f1", "f2", "f3"]);
}
