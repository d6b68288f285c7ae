//! 账户会话：登录、注册、演示数据、登出

use creator_core::account::{LoginForm, SignupForm};
use creator_core::models::{AccountType, Screen, Section};

use crate::helpers::assert_profile_consistent;
use crate::setup::TestEnvironment;
use crate::{assert_not_student, assert_student};

#[test]
fn test_login_seeds_demo_dashboard() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.select_account_type(AccountType::Creator);
    assert_eq!(store.screen(), Screen::Login);

    store
        .login(&LoginForm::new("maya@studio.dev", "secret"))
        .unwrap();

    let user = store.user();
    assert!(store.is_logged_in());
    assert_eq!(user.name, "maya");
    assert_eq!(user.username, "@maya");
    assert_eq!(user.followers, 850);
    assert_eq!(user.students, 47);
    assert_eq!(user.converted_students, 2);
    assert_eq!(user.reward_points, 125);
    assert_eq!(store.courses().len(), 2);
    assert_eq!(store.screen(), Screen::Dashboard);

    assert_student!(store, "2");
    assert_student!(store, "4");
    assert_not_student!(store, "1");
    assert_profile_consistent(&store);
}

#[test]
fn test_blank_login_mutates_nothing() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.select_account_type(AccountType::Creator);
    let before = store.snapshot();

    let err = store.login(&LoginForm::new("", "secret")).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(store.snapshot(), before);
    assert!(!store.is_logged_in());
}

#[test]
fn test_signup_fills_profile() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.select_account_type(AccountType::Creator);
    store
        .signup(&SignupForm::new("Maya Lopez", "maya@studio.dev", "mayacodes", "pw"))
        .unwrap();

    assert_eq!(store.user().name, "Maya Lopez");
    assert_eq!(store.user().username, "@mayacodes");
    assert_eq!(store.account_type(), Some(AccountType::Creator));
}

#[test]
fn test_logout_resets_and_removes_snapshot() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.skip_welcome();
    store.show_section(Section::Rewards);
    assert!(env.snapshot_path().exists());

    store.logout();
    assert!(!env.snapshot_path().exists());
    assert_eq!(store.screen(), Screen::Welcome);
    assert_eq!(store.section(), Section::Dashboard);
    assert!(store.ledger().is_empty());
    assert!(store.reward_history().is_empty());
    assert!(!store.is_logged_in());

    let mut fresh = env.store();
    assert!(!fresh.load());
}

#[test]
fn test_demo_seeding_is_repeatable() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    store.skip_welcome();
    let first = store.snapshot();

    store.seed_demo_data();
    let second = store.snapshot();
    assert_eq!(second.courses, first.courses);
    assert_eq!(second.follower_engagements, first.follower_engagements);
    assert_eq!(store.user().converted_students, 2);
    assert_eq!(store.reward_history().len(), 3);
    assert_profile_consistent(&store);
}
