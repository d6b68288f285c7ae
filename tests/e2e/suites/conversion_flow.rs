//! 互动 -> 转化 -> 奖励 全链路

use creator_core::models::{NotificationKind, RewardKind, StudentFilter};
use creator_shared::events::EngagementType;

use crate::helpers::assert_profile_consistent;
use crate::setup::TestEnvironment;
use crate::{assert_not_student, assert_student};

#[test]
fn test_ninth_like_keeps_follower_tenth_converts() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();

    for _ in 0..9 {
        store.apply_engagement_event(&EngagementType::Like, "f1");
    }
    assert_not_student!(store, "f1");
    assert!(store.reward_history().is_empty());

    let outcome = store.apply_engagement_event(&EngagementType::Like, "f1");
    assert!(outcome.converted());
    assert_student!(store, "f1");

    let rewards = store.reward_history();
    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards[0].kind, RewardKind::Conversion);
    assert_eq!(rewards[0].points, 50);
    assert_profile_consistent(&store);
}

#[test]
fn test_mixed_types_count_toward_threshold() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    let kinds = [
        EngagementType::Like,
        EngagementType::Comment,
        EngagementType::Share,
        EngagementType::Enrollment,
        EngagementType::parse("bookmark"),
    ];

    for i in 0..10 {
        store.apply_engagement_event(&kinds[i % kinds.len()], "mix");
    }

    assert_student!(store, "mix");
    let counters = store.engagement_counters();
    assert_eq!(counters.likes, 2);
    assert_eq!(counters.comments, 2);
    assert_eq!(counters.shares, 2);
    assert_eq!(counters.enrollments, 2);
    assert_eq!(counters.other, 2);
    assert_profile_consistent(&store);
}

#[test]
fn test_conversion_emits_notifications_in_order() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    for _ in 0..10 {
        store.apply_engagement_event(&EngagementType::Share, "f2");
    }

    // 最新的在最前：先转化通知，再互动通知
    let feed = store.notifications();
    assert_eq!(feed[0].kind, NotificationKind::Engagement);
    assert_eq!(feed[1].kind, NotificationKind::Conversion);
    assert_eq!(feed[1].title, "New Student Converted!");
    assert_eq!(feed[1].message, "User f2 became your student after 10 engagements");
    assert_eq!(store.notification_badges().conversion_unread, 1);
}

#[test]
fn test_many_followers_convert_independently() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();

    for round in 0..15 {
        for follower in 0..20 {
            if follower % 3 == 0 && round >= 9 {
                continue;
            }
            store.apply_engagement_event(&EngagementType::Comment, &format!("fan_{follower}"));
        }
    }

    for follower in 0..20 {
        let id = format!("fan_{follower}");
        if follower % 3 == 0 {
            assert_not_student!(store, id.as_str());
            assert_eq!(store.follower(&id).unwrap().engagements, 9);
        } else {
            assert_student!(store, id.as_str());
        }
    }
    assert_eq!(store.user().converted_students, 13);
    assert_eq!(store.filter_students(StudentFilter::Converted).len(), 13);
    assert_eq!(store.user().reward_points, 13 * 50);
    assert_eq!(store.notifications().len(), 50);
    assert_profile_consistent(&store);
}

#[test]
fn test_milestone_reward_is_separate_from_conversions() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    store.grant_reward(RewardKind::Milestone, 25, "Reached 100 total engagements");
    for _ in 0..10 {
        store.apply_engagement_event(&EngagementType::Like, "f1");
    }

    assert_eq!(store.user().reward_points, 75);
    assert_eq!(store.rewards_by_kind(Some(RewardKind::Milestone)).len(), 1);
    assert_eq!(store.rewards_by_kind(Some(RewardKind::Conversion)).len(), 1);
    assert_eq!(store.rewards_by_kind(None).len(), 2);
    assert_eq!(store.reward_history()[0].kind, RewardKind::Conversion);
}
