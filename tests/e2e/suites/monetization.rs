//! 变现资格与提现

use creator_shared::events::EngagementType;

use crate::helpers::assert_profile_consistent;
use crate::setup::TestEnvironment;

#[test]
fn test_two_courses_short_of_eligibility() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    store.set_follower_count(1000);
    for i in 0..100 {
        store.apply_engagement_event(&EngagementType::Like, &format!("f{}", i % 10));
    }
    store.add_course_from_upload("Intro.mp4");
    store.add_course_from_upload("Advanced.mp4");

    let report = store.eligibility();
    assert!(!report.eligible);
    assert!(report.followers.met);
    assert!(report.engagements.met);
    assert!(!report.courses.met);
    assert_eq!(report.courses.remaining(), 1);
    assert!(!store.user().is_monetization_eligible);

    let course = store.add_course_from_upload("Capstone.final.mp4");
    assert_eq!(course.title, "Capstone.final");
    assert!(store.user().is_monetization_eligible);
    assert_profile_consistent(&store);
}

#[test]
fn test_deleting_course_revokes_eligibility() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    store.skip_welcome();
    store.set_follower_count(1200);
    let course = store.add_course_from_upload("Third.mp4");
    assert!(store.user().is_monetization_eligible);

    store.delete_course(&course.id).unwrap();
    assert!(!store.user().is_monetization_eligible);
    assert_eq!(store.user().courses, 2);

    let err = store.delete_course(&course.id).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(store.user().courses, 2);
}

#[test]
fn test_follower_drop_revokes_eligibility() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    store.skip_welcome();
    store.add_course_from_upload("Third.mp4");

    assert!(store.set_follower_count(1000).eligible);
    assert!(!store.set_follower_count(999).eligible);
    assert_eq!(store.eligibility().followers_remaining(), 1);
}

#[test]
fn test_withdraw_after_unlock() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();
    store.skip_welcome();
    store.toggle_face_verification(false);

    let err = store.request_action("withdraw").unwrap_err();
    assert!(err.is_user_facing());

    store.set_follower_count(1000);
    store.add_course_from_upload("Third.mp4");
    assert!(store.request_action("withdraw").is_ok());
}
