//! 模拟器：运行循环、场景与命令行

use std::time::Duration;

use creator_simulator::event_generator::{ScriptedSource, SimulatedEngagementSource};
use creator_simulator::runtime::{RuntimeOptions, SimulationRuntime, StopReason};
use creator_simulator::scenarios::{PredefinedScenarios, Scenario, ScenarioRunner};

use crate::assert_student;
use crate::helpers::assert_profile_consistent;
use crate::setup::TestEnvironment;

fn fast(max_ticks: Option<u64>) -> RuntimeOptions {
    RuntimeOptions {
        tick_interval: Duration::from_millis(1),
        autosave_interval: Duration::from_millis(5),
        max_ticks,
    }
}

#[tokio::test]
async fn test_runtime_output_survives_restart() {
    let env = TestEnvironment::new();
    let store = env.store();
    let source = SimulatedEngagementSource::new(1.0, 4);

    let (store, stats, reason) = SimulationRuntime::new(store, source, fast(Some(60)))
        .run_until(std::future::pending())
        .await;

    assert_eq!(reason, StopReason::MaxTicks);
    assert_eq!(stats.events, 60);
    assert!(stats.saves >= 1);
    assert!(!store.is_dirty());
    // 4 名粉丝共 60 次互动，至少有一名达到阈值
    assert!(stats.conversions >= 1);
    assert_profile_consistent(&store);

    let restored = env.reopen();
    assert_eq!(restored.snapshot(), store.snapshot());
}

#[tokio::test]
async fn test_same_seed_same_simulation() {
    let run = || async {
        let env = TestEnvironment::new();
        let store = env.deferred_store();
        let (store, stats, _) =
            SimulationRuntime::new(store, SimulatedEngagementSource::default(), fast(Some(200)))
                .run_until(std::future::pending())
                .await;
        let ledger: Vec<(String, u32)> = store
            .ledger()
            .iter()
            .map(|(id, record)| (id.to_string(), record.engagements))
            .collect();
        (stats.events, ledger)
    };

    assert_eq!(run().await, run().await);
}

#[tokio::test]
async fn test_scripted_source_drives_conversion() {
    let env = TestEnvironment::new();
    let mut script: Vec<(&str, &str)> = vec![("like", "f1"); 9];
    script.push(("enrollment", "f1"));
    let source = ScriptedSource::from_pairs(script);

    let (store, stats, reason) = SimulationRuntime::new(env.store(), source, fast(None))
        .run_until(std::future::pending())
        .await;

    assert_eq!(reason, StopReason::SourceExhausted);
    assert_eq!(stats.conversions, 1);
    assert_student!(store, "f1");
    assert_eq!(store.engagement_counters().enrollments, 1);
}

#[tokio::test]
async fn test_every_predefined_scenario_passes() {
    for scenario in PredefinedScenarios::all() {
        let env = TestEnvironment::new();
        let mut store = env.deferred_store();
        let result = ScenarioRunner::new(&mut store).run(&scenario).await;

        assert!(
            result.is_all_success(),
            "场景 {} 失败: {:?}",
            scenario.name,
            result.step_results
        );
        assert_profile_consistent(&store);
    }
}

#[tokio::test]
async fn test_json_scenario_end_to_end() {
    let env = TestEnvironment::new();
    let scenario = Scenario::from_json(
        r#"{
            "name": "launch-week",
            "description": "开课周",
            "steps": [
                {"type": "skip_welcome"},
                {"type": "set_followers", "count": 1000},
                {"type": "add_course", "file_name": "Launch.mp4"},
                {"type": "expect_eligible", "expected": true},
                {"type": "repeat", "count": 4, "steps": [
                    {"type": "engage", "follower_id": "3", "engagement_type": "share", "delay_ms": 1}
                ]},
                {"type": "wait", "duration_ms": 1},
                {"type": "expect_student", "follower_id": "3"}
            ]
        }"#,
    )
    .unwrap();

    let mut store = env.store();
    let result = ScenarioRunner::new(&mut store).run(&scenario).await;
    assert!(result.is_all_success(), "{:?}", result.step_results);
    assert_eq!(result.conversions, 1);

    let restored = env.reopen();
    assert_eq!(restored.user().converted_students, 3);
}

#[tokio::test]
async fn test_cli_commands_share_state() {
    let env = TestEnvironment::new();
    let runner = env.runner();

    runner.run_seed(5, 4, true).unwrap();
    runner.run_engage("1", "comment", 2).unwrap();
    runner
        .run_scenario("first_conversion", Some("cli_fan".to_string()), None)
        .await
        .unwrap();

    let status = runner.run_status(true).unwrap();
    assert_eq!(status.screen, "dashboard");
    assert!(status.converted_students >= 4);
    assert_eq!(status.tracked_followers, 11);

    let restored = env.reopen();
    assert_student!(restored, "1");
    assert_student!(restored, "cli_fan");
    assert_profile_consistent(&restored);

    runner.run_reset().unwrap();
    assert!(!env.snapshot_path().exists());
}
