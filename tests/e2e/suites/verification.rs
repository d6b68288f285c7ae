//! 敏感操作的人脸验证

use creator_core::verification::SimulatedCaptureDevice;
use creator_core::{ActionOutcome, SensitiveAction, VerificationStep, is_sensitive_action};

use crate::setup::TestEnvironment;

fn always_pass(env: &mut TestEnvironment) {
    env.config_mut().engine.verification_success_rate = 1.0;
}

#[test]
fn test_sensitive_action_set() {
    for action in [
        "withdraw",
        "add-payment",
        "change-avatar",
        "edit-profile",
        "change-password",
    ] {
        assert!(is_sensitive_action(action), "{action} 应为敏感操作");
    }
    assert!(!is_sensitive_action("share-profile"));
    assert!(!is_sensitive_action("Withdraw"));
}

#[test]
fn test_full_verification_executes_pending_action() {
    let mut env = TestEnvironment::new();
    always_pass(&mut env);
    let mut store = env.deferred_store();
    store.skip_welcome();

    let outcome = store.request_action("change-avatar").unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::VerificationRequired {
            action: SensitiveAction::ChangeAvatar
        }
    );
    assert_eq!(store.verification_step(), VerificationStep::Prompt);

    store.start_verification().unwrap();
    assert_eq!(store.verification_step(), VerificationStep::Capturing);
    assert!(store.capture_device_active());

    store.capture_verification().unwrap();
    assert!(!store.capture_device_active());
    assert_eq!(store.verification_step(), VerificationStep::Processing);

    assert!(store.process_verification().unwrap());
    assert_eq!(
        store.verification_step(),
        VerificationStep::Result { success: true }
    );

    let executed = store.complete_verification(true).unwrap();
    assert!(matches!(
        executed,
        Some(ActionOutcome::Executed { ref message, .. }) if message == "Profile picture updated successfully!"
    ));
    assert!(store.pending_action().is_none());
    assert_eq!(store.verification_step(), VerificationStep::Idle);
}

#[test]
fn test_out_of_order_steps_are_rejected() {
    let env = TestEnvironment::new();
    let mut store = env.deferred_store();

    let err = store.start_verification().unwrap_err();
    assert_eq!(err.code(), "INVALID_TRANSITION");
    assert!(store.complete_verification(true).is_err());

    store.request_action("withdraw").unwrap();
    assert!(store.capture_verification().is_err());
    assert!(store.request_action("edit-profile").is_err());
    assert_eq!(store.pending_action(), Some(SensitiveAction::Withdraw));
}

#[test]
fn test_cancel_at_each_step_releases_device() {
    let mut env = TestEnvironment::new();
    always_pass(&mut env);
    let mut store = env.deferred_store();

    // Prompt
    store.request_action("add-payment").unwrap();
    store.cancel_verification();
    assert_eq!(store.verification_step(), VerificationStep::Idle);

    // Capturing
    store.request_action("add-payment").unwrap();
    store.start_verification().unwrap();
    store.cancel_verification();
    assert!(!store.capture_device_active());

    // Result
    store.request_action("add-payment").unwrap();
    store.start_verification().unwrap();
    store.capture_verification().unwrap();
    store.process_verification().unwrap();
    store.cancel_verification();
    assert!(store.pending_action().is_none());
    assert!(!store.capture_device_active());
}

#[test]
fn test_denied_camera_aborts_to_idle() {
    let env = TestEnvironment::new();
    let mut store = env
        .builder()
        .capture_device(Box::new(SimulatedCaptureDevice::denying()))
        .build();

    store.request_action("change-password").unwrap();
    let err = store.start_verification().unwrap_err();
    assert!(err.is_user_facing());
    assert!(err.to_string().contains("Camera access is required"));
    assert_eq!(store.verification_step(), VerificationStep::Idle);
    assert!(store.pending_action().is_none());
}

#[test]
fn test_disabled_face_verification_runs_directly() {
    let env = TestEnvironment::new();
    let mut store = env.store();
    store.toggle_face_verification(false);

    let outcome = store.request_action("edit-profile").unwrap();
    assert!(matches!(outcome, ActionOutcome::Executed { .. }));

    // 开关会持久化
    let restored = env.reopen();
    assert!(!restored.user().face_verification_enabled);
}
