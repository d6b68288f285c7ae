//! 命令执行器
//!
//! 将命令行参数转化为对 `AppStateStore` 的操作。每条命令都从快照目录载入状态，
//! 执行完成后写回，因此多次调用之间状态是连续的。

use std::path::Path;

use anyhow::{Context, Result};
use creator_core::analytics::{AnalyticsSummary, format_compact, time_ago};
use creator_core::{ActiveConversion, AppStateStore, AutosaveMode, StoreBuilder};
use creator_shared::config::AppConfig;
use creator_shared::events::EngagementType;
use fake::Fake;
use fake::faker::name::en::Name;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::event_generator::{EngagementEventGenerator, EventGenerator, SimulatedEngagementSource};
use crate::runtime::{self, RuntimeOptions, RuntimeStats, SimulationRuntime};
use crate::scenarios::{PredefinedScenarios, Scenario, ScenarioResult, ScenarioRunner};

/// engage 命令的汇总
#[derive(Debug, Clone, Serialize)]
pub struct EngageSummary {
    pub follower_id: String,
    pub engagements: u32,
    pub is_student: bool,
    pub conversions: usize,
}

/// status 命令输出
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub name: String,
    pub screen: String,
    pub followers: u64,
    pub students: u64,
    pub converted_students: u64,
    pub total_engagements: u64,
    pub reward_points: u64,
    pub courses: u64,
    pub tracked_followers: usize,
    pub unread_notifications: usize,
    pub monetization_eligible: bool,
    pub analytics: AnalyticsSummary,
    pub closest_conversions: Vec<ActiveConversion>,
}

impl StatusReport {
    fn from_store(store: &AppStateStore) -> Self {
        let user = store.user();
        let mut closest = store.active_conversions();
        closest.sort_by_key(|c| c.remaining);
        closest.truncate(5);

        Self {
            name: user.display_name().to_string(),
            screen: store.screen().as_str().to_string(),
            followers: user.followers,
            students: user.students,
            converted_students: user.converted_students,
            total_engagements: user.total_engagements,
            reward_points: user.reward_points,
            courses: user.courses,
            tracked_followers: store.ledger().len(),
            unread_notifications: store.notification_badges().total_unread,
            monetization_eligible: user.is_monetization_eligible,
            analytics: store.analytics(),
            closest_conversions: closest,
        }
    }
}

pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 按配置构建存储并载入快照，命令内部使用延迟保存，结束时统一写回
    fn open_store(&self) -> AppStateStore {
        let mut store = StoreBuilder::from_config(&self.config)
            .autosave(AutosaveMode::Deferred)
            .build();
        if store.load() {
            info!(dir = %self.config.persistence.dir, "已载入快照");
        }
        store
    }

    fn persist(store: &mut AppStateStore) -> Result<()> {
        if store.is_dirty() {
            store.try_save().context("保存快照失败")?;
        }
        Ok(())
    }

    /// 执行 simulate 命令
    pub async fn run_simulate(
        &self,
        ticks: Option<u64>,
        tick_ms: Option<u64>,
        probability: Option<f64>,
    ) -> Result<RuntimeStats> {
        let mut simulation = self.config.simulation.clone();
        if let Some(ms) = tick_ms {
            simulation.tick_interval_ms = ms;
        }
        if let Some(p) = probability {
            simulation.event_probability = p;
        }

        let store = self.open_store();
        let source = SimulatedEngagementSource::from(&simulation);
        let options = RuntimeOptions::from_config(&simulation, &self.config.persistence)
            .with_max_ticks(ticks);

        info!(
            tick_ms = simulation.tick_interval_ms,
            probability = simulation.event_probability,
            follower_pool = simulation.follower_pool,
            "启动模拟，按 Ctrl+C 停止"
        );
        let (store, stats, reason) = SimulationRuntime::new(store, source, options)
            .run_until(runtime::ctrl_c())
            .await;
        if store.is_dirty() {
            warn!("退出时仍有未保存的变更");
        }

        println!("\n模拟结果:");
        println!("{}", "-".repeat(40));
        println!("停止原因: {reason:?}");
        println!("tick 数: {}", stats.ticks);
        println!("互动事件: {}", stats.events);
        println!("新转化学员: {}", stats.conversions);
        println!("快照写入: {}", stats.saves);
        println!("{}", "-".repeat(40));

        Ok(stats)
    }

    /// 执行 engage 命令
    pub fn run_engage(
        &self,
        follower_id: &str,
        engagement_type: &str,
        count: u32,
    ) -> Result<EngageSummary> {
        let mut store = self.open_store();
        let generator =
            EngagementEventGenerator::new(EngagementType::parse(engagement_type), "cli");

        let mut conversions = 0;
        for event in generator.generate_batch(follower_id, count as usize) {
            let outcome = store.ingest(&event);
            if let Some(conversion) = &outcome.conversion {
                conversions += 1;
                println!(
                    "{} 已转化为学员 {}（+{} 积分）",
                    conversion.name, conversion.student_id, conversion.reward_points
                );
            }
        }
        Self::persist(&mut store)?;

        let record = store
            .follower(follower_id)
            .with_context(|| format!("粉丝 {follower_id} 不在台账中"))?;
        let summary = EngageSummary {
            follower_id: follower_id.to_string(),
            engagements: record.engagements,
            is_student: record.is_student,
            conversions,
        };

        println!(
            "{}（{}）累计互动 {} 次{}",
            record.name,
            follower_id,
            record.engagements,
            if record.is_student { "，已是学员" } else { "" }
        );
        Ok(summary)
    }

    /// 执行 scenario 命令，`list` 时只打印场景列表
    pub async fn run_scenario(
        &self,
        name: &str,
        follower_id: Option<String>,
        file: Option<String>,
    ) -> Result<Option<ScenarioResult>> {
        if name == "list" && file.is_none() {
            println!("\n可用的预定义场景:");
            println!("{}", "-".repeat(60));
            for scenario in PredefinedScenarios::all() {
                println!("  {} - {}", scenario.name, scenario.description);
            }
            println!("{}", "-".repeat(60));
            println!("\n使用示例: creator-sim scenario -n first_conversion");
            return Ok(None);
        }

        let mut scenario = match file {
            Some(ref path) => Scenario::from_file(Path::new(path))
                .with_context(|| format!("加载场景文件失败: {path}"))?,
            None => PredefinedScenarios::get(name).ok_or_else(|| {
                anyhow::anyhow!(
                    "未找到场景 '{}'\n使用 'scenario -n list' 查看所有可用场景",
                    name
                )
            })?,
        };

        if let Some(ref id) = follower_id {
            info!(follower_id = %id, "覆盖场景中的粉丝 ID");
            scenario = scenario.with_follower(id);
        }

        let mut store = self.open_store();
        let result = ScenarioRunner::new(&mut store).run(&scenario).await;
        Self::persist(&mut store)?;

        println!("\n场景执行结果:");
        println!("{}", "-".repeat(40));
        println!("场景名称: {}", result.scenario_name);
        println!("总步骤数: {}", result.total_steps);
        println!("成功步骤: {}", result.success_steps);
        println!("失败步骤: {}", result.failed_steps);
        println!("互动事件: {}", result.total_events_applied);
        println!("新转化学员: {}", result.conversions);
        println!("执行耗时: {} ms", result.duration_ms);
        println!("成功率: {:.1}%", result.success_rate());
        println!("{}", "-".repeat(40));

        if !result.is_all_success() {
            warn!("场景执行存在失败步骤");
            for step in result.step_results.iter().filter(|s| !s.success) {
                if let Some(ref err) = step.error {
                    error!("步骤 {} ({}) 失败: {}", step.step_index, step.step_type, err);
                }
            }
        }

        Ok(Some(result))
    }

    /// 执行 seed 命令
    ///
    /// 为每名新粉丝生成随机姓名，并随机注入 0..=max_engagements 次互动。
    pub fn run_seed(&self, followers: usize, max_engagements: u32, demo: bool) -> Result<usize> {
        let mut store = self.open_store();
        if demo {
            store.skip_welcome();
        }

        let mut next = store.ledger().len();
        let mut conversions = 0;
        for _ in 0..followers {
            let follower_id = loop {
                next += 1;
                let id = format!("fan_{next}");
                if store.follower(&id).is_none() {
                    break id;
                }
            };

            let name: String = Name().fake_with_rng(store.random_mut().rng_mut());
            store.register_follower(&follower_id, &name, &initials(&name));

            let engagements = store.random_mut().index(max_engagements as usize + 1);
            for _ in 0..engagements {
                let engagement_type = store
                    .random_mut()
                    .pick(&EngagementType::KNOWN)
                    .cloned()
                    .unwrap_or(EngagementType::Like);
                if store
                    .apply_engagement_event(&engagement_type, &follower_id)
                    .converted()
                {
                    conversions += 1;
                }
            }
        }
        Self::persist(&mut store)?;

        info!(followers, conversions, "粉丝数据生成完成");
        println!("\n数据生成完成:");
        println!("{}", "-".repeat(30));
        println!("新增粉丝: {followers}");
        println!("新转化学员: {conversions}");
        println!("台账粉丝总数: {}", store.ledger().len());
        println!("{}", "-".repeat(30));

        Ok(followers)
    }

    /// 执行 status 命令
    pub fn run_status(&self, json: bool) -> Result<StatusReport> {
        let store = self.open_store();
        let report = StatusReport::from_store(&store);

        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("序列化状态失败")?
            );
            return Ok(report);
        }

        println!("\n{}（{}）", report.name, report.screen);
        println!("{}", "-".repeat(40));
        println!("粉丝: {}", format_compact(report.followers));
        println!("学员: {}（转化 {}）", report.students, report.converted_students);
        println!("总互动: {}", format_compact(report.total_engagements));
        println!("奖励积分: {}", report.reward_points);
        println!("课程: {}", report.courses);
        println!("未读通知: {}", report.unread_notifications);
        println!(
            "互动率: {:.1}%  转化率: {:.1}%",
            report.analytics.engagement_rate, report.analytics.conversion_rate
        );
        println!(
            "变现资格: {}",
            if report.monetization_eligible { "已解锁" } else { "未解锁" }
        );
        if !report.closest_conversions.is_empty() {
            println!("即将转化:");
            for c in &report.closest_conversions {
                println!(
                    "  {} - {} 次互动，还差 {} 次",
                    c.name, c.engagements, c.remaining
                );
            }
        }
        let now = store.now();
        let recent: Vec<_> = store.notifications().iter().take(3).collect();
        if !recent.is_empty() {
            println!("最新通知:");
            for n in recent {
                println!("  [{}] {}: {}", time_ago(n.time, now), n.title, n.message);
            }
        }
        println!("{}", "-".repeat(40));

        Ok(report)
    }

    /// 执行 reset 命令
    pub fn run_reset(&self) -> Result<()> {
        let mut store = StoreBuilder::from_config(&self.config).build();
        store.clear_saved_state().context("删除快照失败")?;
        info!(dir = %self.config.persistence.dir, "快照已清除");
        println!("已清除保存的状态");
        Ok(())
    }
}

/// 取姓名中前两个单词的首字母
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}
