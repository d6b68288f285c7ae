//! 粉丝转化引擎
//!
//! 粉丝互动次数达到阈值（>=）且尚未转化时，执行一次完整的转化事务：
//! 标记学员、更新用户计数、创建学员记录、发放转化奖励、发布转化通知。
//! 对同一粉丝重复调用不会产生任何副作用。

use chrono::{DateTime, Utc};
use creator_shared::config::EngineConfig;
use serde::Serialize;
use tracing::{info, warn};

use crate::ledger::EngagementLedger;
use crate::models::{
    NotificationDraft, NotificationKind, RewardKind, StudentRecord, UserProfile, student_id_for,
};
use crate::notification::NotificationCenter;
use crate::random::RandomSource;
use crate::reward::RewardEngine;

/// 转化通知图标
pub const CONVERSION_ICON: &str = "fas fa-user-graduate";

/// 一次转化事务需要修改的全部状态
pub struct ConversionContext<'a> {
    pub ledger: &'a mut EngagementLedger,
    pub user: &'a mut UserProfile,
    pub students: &'a mut Vec<StudentRecord>,
    pub rewards: &'a mut RewardEngine,
    pub notifications: &'a mut NotificationCenter,
    pub random: &'a mut RandomSource,
    pub now: DateTime<Utc>,
}

/// 转化结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub follower_id: String,
    pub student_id: String,
    pub name: String,
    pub engagements: u32,
    pub engagement_rate: u32,
    pub reward_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionEngine {
    threshold: u32,
    reward_points: u32,
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for ConversionEngine {
    fn from(config: &EngineConfig) -> Self {
        Self::new(config.conversion_threshold, config.conversion_reward_points)
    }
}

impl ConversionEngine {
    pub fn new(threshold: u32, reward_points: u32) -> Self {
        Self {
            threshold,
            reward_points,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }

    /// 是否满足转化条件
    pub fn is_eligible(&self, engagements: u32, is_student: bool) -> bool {
        !is_student && engagements >= self.threshold
    }

    /// 评估并在满足条件时执行转化
    ///
    /// 粉丝不存在、未达阈值或已是学员时返回 None 且不修改任何状态。
    pub fn evaluate_conversion(
        &self,
        follower_id: &str,
        ctx: &mut ConversionContext<'_>,
    ) -> Option<ConversionRecord> {
        let record = ctx.ledger.get_mut(follower_id)?;
        if !self.is_eligible(record.engagements, record.is_student) {
            return None;
        }

        record.is_student = true;
        let name = record.name.clone();
        let avatar = record.avatar.clone();
        let engagements = record.engagements;

        ctx.user.converted_students += 1;
        ctx.user.students += 1;

        let student_id = student_id_for(follower_id);
        let engagement_rate = ctx.random.engagement_rate();
        if ctx.students.iter().any(|s| s.id == student_id) {
            warn!(student_id = %student_id, "学员记录已存在，跳过创建");
        } else {
            ctx.students.push(StudentRecord {
                id: student_id.clone(),
                email: StudentRecord::demo_email(&name),
                name: name.clone(),
                avatar,
                join_date: ctx.now.date_naive(),
                courses_enrolled: 0,
                engagement_rate,
                is_converted: true,
                total_engagements: engagements,
            });
        }

        ctx.rewards.grant_reward(
            ctx.user,
            RewardKind::Conversion,
            self.reward_points,
            format!("{name} converted to student"),
            ctx.now,
        );

        ctx.notifications.push(
            NotificationDraft::new(
                NotificationKind::Conversion,
                "New Student Converted!",
                format!("{name} became your student after {engagements} engagements"),
                CONVERSION_ICON,
            ),
            ctx.now,
        );

        info!(
            follower_id = %follower_id,
            student_id = %student_id,
            engagements,
            converted_students = ctx.user.converted_students,
            "粉丝转化为学员"
        );

        Some(ConversionRecord {
            follower_id: follower_id.to_string(),
            student_id,
            name,
            engagements,
            engagement_rate,
            reward_points: self.reward_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creator_shared::events::EngagementType;

    struct Fixture {
        ledger: EngagementLedger,
        user: UserProfile,
        students: Vec<StudentRecord>,
        rewards: RewardEngine,
        notifications: NotificationCenter,
        random: RandomSource,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ledger: EngagementLedger::new(),
                user: UserProfile::default(),
                students: Vec::new(),
                rewards: RewardEngine::new(),
                notifications: NotificationCenter::default(),
                random: RandomSource::seeded(11),
            }
        }

        fn engage(&mut self, follower_id: &str, times: u32) {
            for _ in 0..times {
                self.ledger
                    .record_engagement(follower_id, &EngagementType::Like, &mut self.user);
            }
        }

        fn convert(&mut self, engine: &ConversionEngine, follower_id: &str) -> Option<ConversionRecord> {
            let mut ctx = ConversionContext {
                ledger: &mut self.ledger,
                user: &mut self.user,
                students: &mut self.students,
                rewards: &mut self.rewards,
                notifications: &mut self.notifications,
                random: &mut self.random,
                now: Utc::now(),
            };
            engine.evaluate_conversion(follower_id, &mut ctx)
        }
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let engine = ConversionEngine::default();
        let mut fx = Fixture::new();
        fx.engage("f1", 9);

        assert!(fx.convert(&engine, "f1").is_none());
        assert!(!fx.ledger.get("f1").unwrap().is_student);
        assert!(fx.students.is_empty());
        assert!(fx.rewards.history().is_empty());
        assert_eq!(fx.user.converted_students, 0);
    }

    #[test]
    fn test_conversion_at_threshold() {
        let engine = ConversionEngine::default();
        let mut fx = Fixture::new();
        fx.engage("f1", 10);

        let record = fx.convert(&engine, "f1").unwrap();
        assert_eq!(record.student_id, "student_f1");
        assert_eq!(record.engagements, 10);
        assert!((70..100).contains(&record.engagement_rate));

        assert!(fx.ledger.get("f1").unwrap().is_student);
        assert_eq!(fx.user.converted_students, 1);
        assert_eq!(fx.user.students, 1);
        assert_eq!(fx.user.reward_points, 50);

        let student = &fx.students[0];
        assert_eq!(student.name, "User f1");
        assert_eq!(student.email, "user.f1@email.com");
        assert_eq!(student.courses_enrolled, 0);
        assert!(student.is_converted);

        assert_eq!(fx.rewards.history().len(), 1);
        assert_eq!(fx.rewards.history()[0].points, 50);
        assert_eq!(fx.notifications.entries()[0].title, "New Student Converted!");
        assert_eq!(
            fx.notifications.entries()[0].message,
            "User f1 became your student after 10 engagements"
        );
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let engine = ConversionEngine::default();
        let mut fx = Fixture::new();
        fx.engage("f1", 12);

        assert!(fx.convert(&engine, "f1").is_some());
        assert!(fx.convert(&engine, "f1").is_none());
        fx.engage("f1", 5);
        assert!(fx.convert(&engine, "f1").is_none());

        assert_eq!(fx.students.len(), 1);
        assert_eq!(fx.rewards.history().len(), 1);
        assert_eq!(fx.user.converted_students, 1);
    }

    #[test]
    fn test_missing_follower_is_noop() {
        let engine = ConversionEngine::default();
        let mut fx = Fixture::new();
        assert!(fx.convert(&engine, "ghost").is_none());
        assert!(fx.notifications.is_empty());
    }

    #[test]
    fn test_configured_threshold_and_reward() {
        let engine = ConversionEngine::new(3, 20);
        let mut fx = Fixture::new();
        fx.engage("f1", 3);
        let record = fx.convert(&engine, "f1").unwrap();
        assert_eq!(record.reward_points, 20);
        assert_eq!(fx.user.reward_points, 20);
    }
}
