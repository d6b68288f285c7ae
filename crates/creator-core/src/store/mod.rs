//! 应用状态存储
//!
//! `AppStateStore` 独占所有集合：用户资料、互动台账、课程、学员、通知、奖励历史
//! 以及导航状态。所有修改都通过 `&mut self` 入口完成，因此
//! "记录互动 -> 评估转化 -> 重算变现资格" 三步之间不会有观察者看到中间状态。
//!
//! 按职责拆分为多个子模块，每个子模块为 `AppStateStore` 补充一组操作。

mod account;
mod actions;
mod courses;
mod demo;
mod navigation;
mod notifications;
mod persist;
mod students;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use creator_shared::config::{AppConfig, EngineConfig, MonetizationConfig};
use creator_shared::events::{EngagementEvent, EngagementType};
use serde::Serialize;
use tracing::{debug, info};

use crate::analytics::AnalyticsSummary;
use crate::clock::{Clock, SystemClock};
use crate::conversion::{ConversionContext, ConversionEngine, ConversionRecord};
use crate::ledger::EngagementLedger;
use crate::models::{
    AccountType, Course, EngagementCounters, FollowerEngagementRecord, NotificationBadges,
    NotificationDraft, NotificationEntry, NotificationKind, RewardEntry, RewardKind, Screen,
    Section, StudentRecord, UserProfile,
};
use crate::monetization::{EligibilityReport, MonetizationEvaluator, MonetizationRequirements};
use crate::notification::NotificationCenter;
use crate::persistence::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use crate::random::RandomSource;
use crate::reward::RewardEngine;
use crate::verification::{CaptureDevice, SimulatedCaptureDevice, VerificationFlow};

pub use actions::ActionOutcome;

/// 默认快照 key
pub const DEFAULT_SNAPSHOT_KEY: &str = "creatorFlowState";

/// 自动保存模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutosaveMode {
    /// 每次修改后立即写快照
    #[default]
    Immediate,
    /// 只标记脏位，由调用方定期调用 `save_if_dirty`
    Deferred,
}

/// 一次互动事件的处理结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementOutcome {
    pub follower_id: String,
    pub record: FollowerEngagementRecord,
    pub conversion: Option<ConversionRecord>,
    pub eligibility: EligibilityReport,
}

impl EngagementOutcome {
    pub fn converted(&self) -> bool {
        self.conversion.is_some()
    }
}

/// 转化进度视图
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveConversion {
    pub follower_id: String,
    pub name: String,
    pub avatar: String,
    pub engagements: u32,
    pub progress: f64,
    pub remaining: u32,
}

/// 存储构建器
pub struct StoreBuilder {
    engine: EngineConfig,
    monetization: MonetizationConfig,
    snapshot_key: String,
    autosave: AutosaveMode,
    clock: Arc<dyn Clock>,
    random: Option<RandomSource>,
    snapshots: Option<Arc<dyn SnapshotStore>>,
    device: Option<Box<dyn CaptureDevice>>,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            engine: EngineConfig::default(),
            monetization: MonetizationConfig::default(),
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            autosave: AutosaveMode::default(),
            clock: Arc::new(SystemClock),
            random: None,
            snapshots: None,
            device: None,
        }
    }

    /// 按应用配置初始化：引擎参数、变现门槛、随机种子、快照目录与 key
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .engine(config.engine.clone())
            .monetization(config.monetization.clone())
            .snapshot_key(config.persistence.key.clone())
            .random(RandomSource::from_optional_seed(config.simulation.seed))
            .snapshot_store(Arc::new(FileSnapshotStore::new(
                config.persistence.dir_path(),
            )))
    }

    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn monetization(mut self, monetization: MonetizationConfig) -> Self {
        self.monetization = monetization;
        self
    }

    pub fn snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    pub fn autosave(mut self, mode: AutosaveMode) -> Self {
        self.autosave = mode;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn random(mut self, random: RandomSource) -> Self {
        self.random = Some(random);
        self
    }

    pub fn seed(self, seed: u64) -> Self {
        self.random(RandomSource::seeded(seed))
    }

    pub fn snapshot_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.snapshots = Some(store);
        self
    }

    pub fn capture_device(mut self, device: Box<dyn CaptureDevice>) -> Self {
        self.device = Some(device);
        self
    }

    pub fn build(self) -> AppStateStore {
        let notifications = NotificationCenter::with_capacity(self.engine.notification_capacity);
        let mut store = AppStateStore {
            conversion: ConversionEngine::from(&self.engine),
            requirements: MonetizationRequirements::from(&self.monetization),
            engine: self.engine,
            user: UserProfile::default(),
            account_type: None,
            ledger: EngagementLedger::new(),
            courses: Vec::new(),
            students: Vec::new(),
            notifications,
            rewards: RewardEngine::new(),
            screen: Screen::default(),
            section: Section::default(),
            clock: self.clock,
            random: self.random.unwrap_or_default(),
            snapshots: self
                .snapshots
                .unwrap_or_else(|| Arc::new(MemorySnapshotStore::new())),
            snapshot_key: self.snapshot_key,
            autosave: self.autosave,
            verification: VerificationFlow::new(
                self.device
                    .unwrap_or_else(|| Box::new(SimulatedCaptureDevice::new())),
            ),
            dirty: false,
        };
        store.user.join_date = store.clock.now();
        store.refresh_eligibility();
        store
    }
}

/// 应用状态聚合根
pub struct AppStateStore {
    engine: EngineConfig,
    conversion: ConversionEngine,
    requirements: MonetizationRequirements,

    user: UserProfile,
    account_type: Option<AccountType>,
    ledger: EngagementLedger,
    courses: Vec<Course>,
    students: Vec<StudentRecord>,
    notifications: NotificationCenter,
    rewards: RewardEngine,
    screen: Screen,
    section: Section,

    clock: Arc<dyn Clock>,
    random: RandomSource,
    snapshots: Arc<dyn SnapshotStore>,
    snapshot_key: String,
    autosave: AutosaveMode,
    verification: VerificationFlow,
    dirty: bool,
}

impl std::fmt::Debug for AppStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateStore")
            .field("user", &self.user)
            .field("followers_tracked", &self.ledger.len())
            .field("courses", &self.courses.len())
            .field("students", &self.students.len())
            .field("screen", &self.screen)
            .field("section", &self.section)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for AppStateStore {
    fn default() -> Self {
        StoreBuilder::new().build()
    }
}

impl AppStateStore {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    // ==================== 互动处理 ====================

    /// 处理一次互动事件
    ///
    /// 固定顺序：记录互动 -> 评估转化 -> 发布互动通知 -> 重算变现资格。
    pub fn apply_engagement_event(
        &mut self,
        engagement_type: &EngagementType,
        follower_id: &str,
    ) -> EngagementOutcome {
        let now = self.clock.now();

        let mut record = self
            .ledger
            .record_engagement(follower_id, engagement_type, &mut self.user);

        // 转化只会修改 is_student
        let conversion = self.evaluate_conversion_at(follower_id, now);
        if conversion.is_some() {
            record.is_student = true;
        }

        self.notifications.push(
            NotificationDraft::new(
                NotificationKind::Engagement,
                "New Engagement",
                format!("Received a {} from {}", engagement_type, record.name),
                engagement_type.icon(),
            ),
            now,
        );

        let eligibility = self.refresh_eligibility();
        self.touch();

        EngagementOutcome {
            follower_id: follower_id.to_string(),
            record,
            conversion,
            eligibility,
        }
    }

    /// 处理事件源投递的互动事件
    pub fn ingest(&mut self, event: &EngagementEvent) -> EngagementOutcome {
        debug!(
            event_id = %event.event_id,
            source = %event.source,
            follower_id = %event.follower_id,
            "接收互动事件"
        );
        self.apply_engagement_event(&event.engagement_type, &event.follower_id)
    }

    /// 对指定粉丝单独评估一次转化
    pub fn evaluate_conversion(&mut self, follower_id: &str) -> Option<ConversionRecord> {
        let now = self.clock.now();
        let record = self.evaluate_conversion_at(follower_id, now);
        if record.is_some() {
            self.refresh_eligibility();
            self.touch();
        }
        record
    }

    fn evaluate_conversion_at(
        &mut self,
        follower_id: &str,
        now: DateTime<Utc>,
    ) -> Option<ConversionRecord> {
        let mut ctx = ConversionContext {
            ledger: &mut self.ledger,
            user: &mut self.user,
            students: &mut self.students,
            rewards: &mut self.rewards,
            notifications: &mut self.notifications,
            random: &mut self.random,
            now,
        };
        self.conversion.evaluate_conversion(follower_id, &mut ctx)
    }

    /// 发放里程碑等非转化奖励
    pub fn grant_reward(&mut self, kind: RewardKind, points: u32, description: &str) -> RewardEntry {
        let now = self.clock.now();
        let entry = self
            .rewards
            .grant_reward(&mut self.user, kind, points, description, now)
            .clone();
        self.touch();
        entry
    }

    /// 登记粉丝的显示名和头像缩写，已存在时只更新展示信息
    pub fn register_follower(
        &mut self,
        follower_id: &str,
        name: &str,
        avatar: &str,
    ) -> FollowerEngagementRecord {
        let record = self.ledger.register(follower_id, name, avatar).clone();
        self.touch();
        record
    }

    /// 更新粉丝数并重算变现资格
    pub fn set_follower_count(&mut self, followers: u64) -> EligibilityReport {
        info!(from = self.user.followers, to = followers, "更新粉丝数");
        self.user.followers = followers;
        let report = self.refresh_eligibility();
        self.touch();
        report
    }

    /// 重新评估变现资格并写回用户资料
    pub fn refresh_eligibility(&mut self) -> EligibilityReport {
        let report = MonetizationEvaluator::evaluate(&self.user, &self.requirements);
        if report.eligible != self.user.is_monetization_eligible {
            info!(eligible = report.eligible, "变现资格变化");
        }
        self.user.is_monetization_eligible = report.eligible;
        report
    }

    // ==================== 只读视图 ====================

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn account_type(&self) -> Option<AccountType> {
        self.account_type
    }

    pub fn ledger(&self) -> &EngagementLedger {
        &self.ledger
    }

    pub fn follower(&self, follower_id: &str) -> Option<&FollowerEngagementRecord> {
        self.ledger.get(follower_id)
    }

    pub fn engagement_counters(&self) -> &EngagementCounters {
        self.ledger.counters()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn notifications(&self) -> &[NotificationEntry] {
        self.notifications.entries()
    }

    pub fn notification_badges(&self) -> NotificationBadges {
        self.notifications.badges()
    }

    pub fn reward_history(&self) -> &[RewardEntry] {
        self.rewards.history()
    }

    pub fn rewards_by_kind(&self, kind: Option<RewardKind>) -> Vec<&RewardEntry> {
        self.rewards.filter(kind)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn requirements(&self) -> &MonetizationRequirements {
        &self.requirements
    }

    pub fn conversion_engine(&self) -> &ConversionEngine {
        &self.conversion
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    /// 当前变现资格（每次重新计算）
    pub fn eligibility(&self) -> EligibilityReport {
        MonetizationEvaluator::evaluate(&self.user, &self.requirements)
    }

    pub fn analytics(&self) -> AnalyticsSummary {
        AnalyticsSummary::from_user(&self.user)
    }

    /// 正在转化中的粉丝
    pub fn active_conversions(&self) -> Vec<ActiveConversion> {
        let threshold = self.conversion.threshold();
        self.ledger
            .active_conversions()
            .map(|(id, record)| ActiveConversion {
                follower_id: id.to_string(),
                name: record.name.clone(),
                avatar: record.avatar.clone(),
                engagements: record.engagements,
                progress: record.progress(threshold),
                remaining: record.remaining(threshold),
            })
            .collect()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn random_mut(&mut self) -> &mut RandomSource {
        &mut self.random
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn autosave_mode(&self) -> AutosaveMode {
        self.autosave
    }

    pub fn set_autosave_mode(&mut self, mode: AutosaveMode) {
        self.autosave = mode;
    }

    /// 标记状态已变化，立即模式下同时写快照
    fn touch(&mut self) {
        self.dirty = true;
        if self.autosave == AutosaveMode::Immediate {
            self.save();
        }
    }
}
