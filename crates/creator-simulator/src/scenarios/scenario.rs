//! 场景定义和执行器
//!
//! 场景由多个步骤组成，直接作用于 `AppStateStore`，支持嵌套循环、延时和断言。

use std::path::Path;
use std::time::Instant;

use creator_core::{ActionOutcome, AppStateStore};
use creator_shared::error::CreatorError;
use creator_shared::events::{EngagementEvent, EngagementType};
use serde::{Deserialize, Serialize};
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use crate::error::{Result, SimulatorError};

// ---------------------------------------------------------------------------
// 场景定义
// ---------------------------------------------------------------------------

/// 场景定义
///
/// 支持序列化为 JSON/YAML，便于从文件加载自定义场景。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// 按扩展名从文件加载场景（.json / .yaml / .yml）
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::from_json(&content)?),
            Some("yaml") | Some("yml") => Ok(Self::from_yaml(&content)?),
            other => Err(SimulatorError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn builder(name: impl Into<String>) -> ScenarioBuilder {
        ScenarioBuilder::new(name)
    }

    /// 把所有互动步骤的粉丝 ID 替换为指定值
    pub fn with_follower(mut self, follower_id: &str) -> Self {
        fn rewrite(steps: &mut [ScenarioStep], follower_id: &str) {
            for step in steps {
                match step {
                    ScenarioStep::Engage { follower_id: f, .. }
                    | ScenarioStep::ExpectStudent { follower_id: f, .. } => {
                        *f = follower_id.to_string();
                    }
                    ScenarioStep::Repeat { steps, .. } => rewrite(steps, follower_id),
                    _ => {}
                }
            }
        }
        rewrite(&mut self.steps, follower_id);
        self
    }
}

fn default_true() -> bool {
    true
}

/// 场景步骤
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// 一次互动
    Engage {
        follower_id: String,
        engagement_type: EngagementType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
    },
    /// 重复执行子步骤
    Repeat { count: u32, steps: Vec<ScenarioStep> },
    Wait { duration_ms: u64 },
    /// 以创作者身份跳过欢迎页并载入演示数据
    SkipWelcome,
    SetFollowers { count: u64 },
    AddCourse { file_name: String },
    DeleteCourse { course_id: String },
    /// 请求操作；需要人脸验证且 verify 为 true 时自动走完验证流程
    Action {
        action: String,
        #[serde(default = "default_true")]
        verify: bool,
    },
    /// 断言粉丝是否已转化
    ExpectStudent {
        follower_id: String,
        #[serde(default = "default_true")]
        expected: bool,
    },
    /// 断言变现资格
    ExpectEligible { expected: bool },
}

impl ScenarioStep {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Engage { .. } => "engage",
            Self::Repeat { .. } => "repeat",
            Self::Wait { .. } => "wait",
            Self::SkipWelcome => "skip_welcome",
            Self::SetFollowers { .. } => "set_followers",
            Self::AddCourse { .. } => "add_course",
            Self::DeleteCourse { .. } => "delete_course",
            Self::Action { .. } => "action",
            Self::ExpectStudent { .. } => "expect_student",
            Self::ExpectEligible { .. } => "expect_eligible",
        }
    }
}

// ---------------------------------------------------------------------------
// 场景构建器
// ---------------------------------------------------------------------------

pub struct ScenarioBuilder {
    name: String,
    description: String,
    steps: Vec<ScenarioStep>,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn step(mut self, step: ScenarioStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn engage(self, follower_id: impl Into<String>, engagement_type: &str) -> Self {
        self.step(ScenarioStep::Engage {
            follower_id: follower_id.into(),
            engagement_type: EngagementType::parse(engagement_type),
            delay_ms: None,
        })
    }

    /// 同一粉丝连续互动 count 次
    pub fn engage_times(
        self,
        follower_id: impl Into<String>,
        engagement_type: &str,
        count: u32,
    ) -> Self {
        self.step(ScenarioStep::Repeat {
            count,
            steps: vec![ScenarioStep::Engage {
                follower_id: follower_id.into(),
                engagement_type: EngagementType::parse(engagement_type),
                delay_ms: None,
            }],
        })
    }

    pub fn wait(self, duration_ms: u64) -> Self {
        self.step(ScenarioStep::Wait { duration_ms })
    }

    pub fn skip_welcome(self) -> Self {
        self.step(ScenarioStep::SkipWelcome)
    }

    pub fn set_followers(self, count: u64) -> Self {
        self.step(ScenarioStep::SetFollowers { count })
    }

    pub fn add_course(self, file_name: impl Into<String>) -> Self {
        self.step(ScenarioStep::AddCourse {
            file_name: file_name.into(),
        })
    }

    pub fn action(self, action: impl Into<String>) -> Self {
        self.step(ScenarioStep::Action {
            action: action.into(),
            verify: true,
        })
    }

    pub fn expect_student(self, follower_id: impl Into<String>, expected: bool) -> Self {
        self.step(ScenarioStep::ExpectStudent {
            follower_id: follower_id.into(),
            expected,
        })
    }

    pub fn expect_eligible(self, expected: bool) -> Self {
        self.step(ScenarioStep::ExpectEligible { expected })
    }

    pub fn build(self) -> Scenario {
        Scenario {
            name: self.name,
            description: self.description,
            steps: self.steps,
        }
    }
}

// ---------------------------------------------------------------------------
// 场景执行结果
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    /// 总步骤数（展开 Repeat 后）
    pub total_steps: usize,
    pub success_steps: usize,
    pub failed_steps: usize,
    pub total_events_applied: usize,
    pub conversions: usize,
    pub duration_ms: u64,
    pub step_results: Vec<StepResult>,
}

impl ScenarioResult {
    pub fn is_all_success(&self) -> bool {
        self.failed_steps == 0
    }

    /// 成功率（百分比）
    pub fn success_rate(&self) -> f64 {
        if self.total_steps == 0 {
            100.0
        } else {
            (self.success_steps as f64 / self.total_steps as f64) * 100.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub step_index: usize,
    pub step_type: String,
    pub success: bool,
    pub events_applied: usize,
    pub converted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    fn ok(step_index: usize, step_type: &str) -> Self {
        Self {
            step_index,
            step_type: step_type.to_string(),
            success: true,
            events_applied: 0,
            converted: false,
            error: None,
        }
    }

    fn failed(step_index: usize, step_type: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::ok(step_index, step_type)
        }
    }
}

// ---------------------------------------------------------------------------
// 场景执行器
// ---------------------------------------------------------------------------

/// 场景执行器
///
/// 单个步骤失败不会中断整个场景。
pub struct ScenarioRunner<'a> {
    store: &'a mut AppStateStore,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(store: &'a mut AppStateStore) -> Self {
        Self { store }
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.name))]
    pub async fn run(&mut self, scenario: &Scenario) -> ScenarioResult {
        let start = Instant::now();
        info!(steps = scenario.steps.len(), "开始执行场景");

        let mut step_results = Vec::new();
        for (step_index, step) in Self::flatten_steps(&scenario.steps).into_iter().enumerate() {
            step_results.push(self.execute_single_step(&step, step_index).await);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let success_steps = step_results.iter().filter(|r| r.success).count();
        let failed_steps = step_results.len() - success_steps;
        let total_events_applied = step_results.iter().map(|r| r.events_applied).sum();
        let conversions = step_results.iter().filter(|r| r.converted).count();

        info!(
            total_steps = step_results.len(),
            success_steps,
            failed_steps,
            total_events_applied,
            conversions,
            duration_ms,
            "场景执行完成"
        );

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            total_steps: step_results.len(),
            success_steps,
            failed_steps,
            total_events_applied,
            conversions,
            duration_ms,
            step_results,
        }
    }

    /// 将嵌套的 Repeat 展开为扁平列表，逆序压栈以保持执行顺序
    fn flatten_steps(steps: &[ScenarioStep]) -> Vec<ScenarioStep> {
        let mut result = Vec::new();
        let mut stack: Vec<&ScenarioStep> = steps.iter().rev().collect();

        while let Some(step) = stack.pop() {
            match step {
                ScenarioStep::Repeat { count, steps } => {
                    debug!(count, nested_steps = steps.len(), "展开重复步骤");
                    for _ in 0..*count {
                        stack.extend(steps.iter().rev());
                    }
                }
                other => result.push(other.clone()),
            }
        }

        result
    }

    async fn execute_single_step(&mut self, step: &ScenarioStep, step_index: usize) -> StepResult {
        let step_type = step.type_name();
        debug!(step_index, step_type, "执行步骤");

        let result = match step {
            ScenarioStep::Engage {
                follower_id,
                engagement_type,
                delay_ms,
            } => {
                Self::apply_delay(*delay_ms).await;
                let event = EngagementEvent::new(engagement_type.clone(), follower_id, "scenario");
                let outcome = self.store.ingest(&event);
                StepResult {
                    events_applied: 1,
                    converted: outcome.converted(),
                    ..StepResult::ok(step_index, step_type)
                }
            }
            ScenarioStep::Wait { duration_ms } => {
                sleep(Duration::from_millis(*duration_ms)).await;
                StepResult::ok(step_index, step_type)
            }
            ScenarioStep::SkipWelcome => {
                self.store.skip_welcome();
                StepResult::ok(step_index, step_type)
            }
            ScenarioStep::SetFollowers { count } => {
                self.store.set_follower_count(*count);
                StepResult::ok(step_index, step_type)
            }
            ScenarioStep::AddCourse { file_name } => {
                self.store.add_course_from_upload(file_name);
                StepResult::ok(step_index, step_type)
            }
            ScenarioStep::DeleteCourse { course_id } => match self.store.delete_course(course_id) {
                Ok(_) => StepResult::ok(step_index, step_type),
                Err(e) => StepResult::failed(step_index, step_type, e.to_string()),
            },
            ScenarioStep::Action { action, verify } => match self.run_action(action, *verify) {
                Ok(_) => StepResult::ok(step_index, step_type),
                Err(e) => StepResult::failed(step_index, step_type, e.to_string()),
            },
            ScenarioStep::ExpectStudent {
                follower_id,
                expected,
            } => {
                let actual = self
                    .store
                    .follower(follower_id)
                    .is_some_and(|record| record.is_student);
                if actual == *expected {
                    StepResult::ok(step_index, step_type)
                } else {
                    StepResult::failed(
                        step_index,
                        step_type,
                        format!("粉丝 {follower_id} 转化状态为 {actual}，预期 {expected}"),
                    )
                }
            }
            ScenarioStep::ExpectEligible { expected } => {
                let actual = self.store.user().is_monetization_eligible;
                if actual == *expected {
                    StepResult::ok(step_index, step_type)
                } else {
                    StepResult::failed(
                        step_index,
                        step_type,
                        format!("变现资格为 {actual}，预期 {expected}"),
                    )
                }
            }
            // flatten_steps 已展开
            ScenarioStep::Repeat { .. } => StepResult::ok(step_index, step_type),
        };

        if let Some(ref err) = result.error {
            error!(step_index, step_type, error = %err, "步骤执行失败");
        }
        result
    }

    /// 请求操作，需要验证时依次执行 start -> capture -> process -> complete
    fn run_action(
        &mut self,
        action: &str,
        verify: bool,
    ) -> std::result::Result<ActionOutcome, CreatorError> {
        let outcome = self.store.request_action(action)?;
        if !matches!(outcome, ActionOutcome::VerificationRequired { .. }) {
            return Ok(outcome);
        }
        if !verify {
            self.store.cancel_verification();
            return Ok(outcome);
        }

        let verified = self.verify_pending().inspect_err(|_| {
            self.store.cancel_verification();
        })?;
        verified.ok_or_else(|| CreatorError::ActionRejected {
            reason: "Face verification failed".to_string(),
        })
    }

    fn verify_pending(&mut self) -> std::result::Result<Option<ActionOutcome>, CreatorError> {
        self.store.start_verification()?;
        self.store.capture_verification()?;
        let passed = self.store.process_verification()?;
        self.store.complete_verification(passed)
    }

    async fn apply_delay(delay_ms: Option<u64>) {
        if let Some(ms) = delay_ms
            && ms > 0
        {
            sleep(Duration::from_millis(ms)).await;
        }
    }
}
