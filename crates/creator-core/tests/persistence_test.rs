//! 文件快照持久化集成测试

use std::sync::Arc;

use creator_core::models::{Screen, Section};
use creator_core::persistence::{FileSnapshotStore, SnapshotStore};
use creator_core::{AppStateStore, AutosaveMode};
use creator_shared::events::EngagementType;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> AppStateStore {
    AppStateStore::builder()
        .seed(77)
        .snapshot_store(Arc::new(FileSnapshotStore::new(dir.path())))
        .build()
}

#[test]
fn test_file_round_trip_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.skip_welcome();
    for id in ["zeta", "alpha", "mid"] {
        for _ in 0..10 {
            store.apply_engagement_event(&EngagementType::Like, id);
        }
    }
    store.show_section(Section::Rewards);

    let mut restored = store_in(&dir);
    assert!(restored.load());

    let ids: Vec<&str> = restored.ledger().iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "zeta", "alpha", "mid"]);
    assert_eq!(restored.reward_history(), store.reward_history());
    assert_eq!(restored.user(), store.user());
    assert_eq!(restored.screen(), Screen::Dashboard);
    assert_eq!(restored.section(), Section::Rewards);
}

#[test]
fn test_snapshot_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.skip_welcome();

    let raw = FileSnapshotStore::new(dir.path())
        .read("creatorFlowState")
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    for key in [
        "user",
        "accountType",
        "engagementData",
        "followerEngagements",
        "courses",
        "students",
        "notifications",
        "rewardHistory",
        "currentScreen",
        "currentSection",
    ] {
        assert!(json.get(key).is_some(), "缺少字段 {key}");
    }
    assert_eq!(json["accountType"], "creator");
    assert_eq!(json["currentScreen"], "dashboard");
    assert_eq!(json["followerEngagements"][0][0], "1");
    assert_eq!(json["followerEngagements"][0][1]["name"], "Alex Rivera");
    assert_eq!(json["user"]["isMonetizationEligible"], false);
    assert_eq!(json["rewardHistory"][0]["type"], "conversion");
}

#[test]
fn test_deferred_store_writes_only_on_flush() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = AppStateStore::builder()
        .autosave(AutosaveMode::Deferred)
        .snapshot_store(Arc::new(FileSnapshotStore::new(dir.path())))
        .build();
    store.apply_engagement_event(&EngagementType::Share, "f1");
    assert!(!dir.path().join("creatorFlowState.json").exists());

    assert!(store.save_if_dirty());
    assert!(dir.path().join("creatorFlowState.json").exists());
}

#[test]
fn test_unwritable_directory_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut store = AppStateStore::builder()
        .snapshot_store(Arc::new(FileSnapshotStore::new(blocker.join("state"))))
        .build();
    store.apply_engagement_event(&EngagementType::Like, "f1");

    assert!(!store.save());
    assert!(store.try_save().unwrap_err().is_persistence());
    assert_eq!(store.user().total_engagements, 1);
}

#[test]
fn test_logout_removes_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store_in(&dir);
    store.skip_welcome();
    assert!(dir.path().join("creatorFlowState.json").exists());

    store.logout();
    assert!(!dir.path().join("creatorFlowState.json").exists());

    let mut fresh = store_in(&dir);
    assert!(!fresh.load());
    assert_eq!(fresh.screen(), Screen::Welcome);
}
