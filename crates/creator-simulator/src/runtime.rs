//! 模拟运行循环
//!
//! 单个任务独占 `AppStateStore`，用 `tokio::select!` 同时等待：
//! - 事件 tick：轮询事件来源，产生事件时交给状态机
//! - 自动保存 tick：有未保存变更时写一次快照，多次变更合并为一次写入
//! - 关闭信号：退出前再保存一次
//!
//! 快照写入失败只记录日志，不中断循环。

use std::future::Future;
use std::time::Duration;

use creator_core::{AppStateStore, AutosaveMode};
use creator_shared::config::{PersistenceConfig, SimulationConfig};
use serde::Serialize;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, instrument, warn};

use crate::event_generator::EngagementSource;

/// 运行循环参数
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub tick_interval: Duration,
    pub autosave_interval: Duration,
    /// 达到该 tick 数后停止，None 表示一直运行到关闭信号
    pub max_ticks: Option<u64>,
}

impl RuntimeOptions {
    pub fn from_config(simulation: &SimulationConfig, persistence: &PersistenceConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(simulation.tick_interval_ms.max(1)),
            autosave_interval: Duration::from_secs(persistence.autosave_interval_secs.max(1)),
            max_ticks: None,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default(), &PersistenceConfig::default())
    }
}

/// 运行统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeStats {
    pub ticks: u64,
    pub events: u64,
    pub conversions: u64,
    pub saves: u64,
}

/// 停止原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Shutdown,
    MaxTicks,
    SourceExhausted,
}

pub struct SimulationRuntime<S> {
    store: AppStateStore,
    source: S,
    options: RuntimeOptions,
    stats: RuntimeStats,
}

impl<S: EngagementSource> SimulationRuntime<S> {
    /// 创建运行循环，存储切换为延迟保存模式，由自动保存 tick 负责落盘
    pub fn new(mut store: AppStateStore, source: S, options: RuntimeOptions) -> Self {
        store.set_autosave_mode(AutosaveMode::Deferred);
        Self {
            store,
            source,
            options,
            stats: RuntimeStats::default(),
        }
    }

    pub fn store(&self) -> &AppStateStore {
        &self.store
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    /// 处理一个事件 tick
    pub fn tick(&mut self) {
        self.stats.ticks += 1;
        let Some(event) = self.source.next_event(self.store.random_mut()) else {
            return;
        };

        let outcome = self.store.ingest(&event);
        self.stats.events += 1;
        if outcome.converted() {
            self.stats.conversions += 1;
        }
        debug!(
            follower_id = %event.follower_id,
            engagement_type = %event.engagement_type,
            engagements = outcome.record.engagements,
            "模拟互动"
        );
    }

    fn flush(&mut self) {
        if self.store.is_dirty() {
            if self.store.save_if_dirty() {
                self.stats.saves += 1;
            } else {
                warn!("自动保存失败，将在下次 tick 重试");
            }
        }
    }

    /// 运行直到关闭信号、tick 上限或事件来源耗尽
    ///
    /// 返回存储本身，调用方可继续读取最终状态。
    #[instrument(skip_all, fields(source = self.source.name()))]
    pub async fn run_until<F>(mut self, shutdown: F) -> (AppStateStore, RuntimeStats, StopReason)
    where
        F: Future<Output = ()>,
    {
        let mut events = interval(self.options.tick_interval);
        events.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut autosave = interval(self.options.autosave_interval);
        autosave.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval 的第一次 tick 立即完成，自动保存跳过它
        autosave.tick().await;

        tokio::pin!(shutdown);
        info!(
            tick_ms = self.options.tick_interval.as_millis() as u64,
            autosave_secs = self.options.autosave_interval.as_secs(),
            max_ticks = ?self.options.max_ticks,
            "模拟运行开始"
        );

        let reason = loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break StopReason::Shutdown,
                _ = events.tick() => {
                    self.tick();
                    if self.source.is_exhausted() {
                        break StopReason::SourceExhausted;
                    }
                    if self.options.max_ticks.is_some_and(|max| self.stats.ticks >= max) {
                        break StopReason::MaxTicks;
                    }
                }
                _ = autosave.tick() => self.flush(),
            }
        };

        self.flush();
        info!(
            reason = ?reason,
            ticks = self.stats.ticks,
            events = self.stats.events,
            conversions = self.stats.conversions,
            saves = self.stats.saves,
            "模拟运行结束"
        );
        (self.store, self.stats, reason)
    }
}

/// 等待 Ctrl+C
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "监听 Ctrl+C 失败");
        std::future::pending::<()>().await;
    }
    info!("收到 Ctrl+C，准备退出");
}
