//! 演示数据
//!
//! 创作者账户登录后填充一组演示数据。演示粉丝以未转化状态进入台账，
//! 再逐个走正常的转化评估，因此用户资料上的计数与台账保持一致。

use chrono::Duration;
use tracing::info;

use super::AppStateStore;
use crate::ledger::EngagementLedger;
use crate::models::{
    AccountType, Course, EngagementCounters, NotificationDraft, NotificationKind, RewardKind,
};

/// 演示粉丝：(id, 名称, 头像, 互动次数)
pub const DEMO_FOLLOWERS: [(&str, &str, &str, u32); 5] = [
    ("1", "Alex Rivera", "AR", 8),
    ("2", "Sarah Chen", "SC", 12),
    ("3", "Marcus Johnson", "MJ", 6),
    ("4", "Emma Wilson", "EW", 15),
    ("5", "David Kim", "DK", 9),
];

fn demo_courses() -> Vec<Course> {
    vec![
        Course {
            id: "course_1".to_string(),
            title: "Web Development Fundamentals".to_string(),
            description: "Learn HTML, CSS, and JavaScript basics".to_string(),
            students: 234,
            rating: 4.8,
            category: "Programming".to_string(),
            price: 79.99,
            engagements: 145,
        },
        Course {
            id: "course_2".to_string(),
            title: "UI/UX Design Principles".to_string(),
            description: "Master design thinking and user experience".to_string(),
            students: 189,
            rating: 4.6,
            category: "Design".to_string(),
            price: 89.99,
            engagements: 98,
        },
    ]
}

impl AppStateStore {
    /// 填充演示数据，仅对创作者账户生效
    ///
    /// 演示集合整体替换当前集合，重复调用得到相同结果。
    pub fn seed_demo_data(&mut self) {
        if self.user.account_type != Some(AccountType::Creator) {
            self.refresh_eligibility();
            return;
        }

        let now = self.clock.now();

        self.user.followers = 850;
        self.user.students = 45;
        self.user.total_earnings = 2450.75;
        self.user.total_engagements = 632;
        self.user.converted_students = 0;
        self.user.reward_points = 0;

        self.ledger = EngagementLedger::from_pairs(
            EngagementCounters {
                likes: 320,
                comments: 156,
                shares: 89,
                enrollments: 67,
                other: 0,
            },
            Vec::new(),
        );
        self.students.clear();
        self.rewards.clear();
        self.notifications.clear();

        self.courses = demo_courses();
        self.user.courses = self.courses.len() as u64;

        let milestone_id = self.notifications.push(
            NotificationDraft::new(
                NotificationKind::Milestone,
                "Follower Milestone",
                format!(
                    "You've reached {} followers! {} more for monetization",
                    self.user.followers,
                    self.requirements
                        .min_followers
                        .saturating_sub(self.user.followers)
                ),
                "fas fa-users",
            ),
            now - Duration::hours(2),
        );
        // 该条演示通知为已读
        let _ = self.notifications.mark_read(&milestone_id);
        self.notifications.push(
            NotificationDraft::new(
                NotificationKind::Engagement,
                "High Engagement Alert",
                "Your Web Development course received 15 new likes",
                "fas fa-heart",
            ),
            now - Duration::hours(1),
        );

        self.rewards.grant_reward(
            &mut self.user,
            RewardKind::Milestone,
            25,
            "Reached 500 total engagements",
            now - Duration::days(1),
        );

        for (id, name, avatar, engagements) in DEMO_FOLLOWERS {
            self.ledger.register(id, name, avatar);
            if let Some(record) = self.ledger.get_mut(id) {
                record.engagements = engagements;
            }
        }
        for (id, ..) in DEMO_FOLLOWERS {
            self.evaluate_conversion_at(id, now);
        }

        self.refresh_eligibility();
        info!(
            followers = self.user.followers,
            converted_students = self.user.converted_students,
            reward_points = self.user.reward_points,
            "已填充演示数据"
        );
    }
}
