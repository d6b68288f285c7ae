//! 互动计数模型

use creator_shared::events::EngagementType;
use serde::{Deserialize, Serialize};

/// 聚合互动计数
///
/// 已知类型各有一个计数器，未识别的类型计入 `other`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementCounters {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub enrollments: u64,
    pub other: u64,
}

impl EngagementCounters {
    pub fn increment(&mut self, engagement_type: &EngagementType) {
        let bucket = match engagement_type {
            EngagementType::Like => &mut self.likes,
            EngagementType::Comment => &mut self.comments,
            EngagementType::Share => &mut self.shares,
            EngagementType::Enrollment => &mut self.enrollments,
            EngagementType::Other(_) => &mut self.other,
        };
        *bucket += 1;
    }

    pub fn get(&self, engagement_type: &EngagementType) -> u64 {
        match engagement_type {
            EngagementType::Like => self.likes,
            EngagementType::Comment => self.comments,
            EngagementType::Share => self.shares,
            EngagementType::Enrollment => self.enrollments,
            EngagementType::Other(_) => self.other,
        }
    }

    pub fn total(&self) -> u64 {
        self.likes + self.comments + self.shares + self.enrollments + self.other
    }
}

/// 单个粉丝的互动记录
///
/// `engagements` 只增不减；`is_student` 一旦为 true 不再回退。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerEngagementRecord {
    pub name: String,
    pub avatar: String,
    pub engagements: u32,
    pub is_student: bool,
}

impl FollowerEngagementRecord {
    /// 首次出现的粉丝使用默认展示名
    ///
    /// `follower_42` -> 名称 `User 42`，头像 `U42`；ID 不含下划线时使用整个 ID。
    pub fn placeholder(follower_id: &str) -> Self {
        let suffix = follower_id
            .split_once('_')
            .map(|(_, rest)| rest)
            .unwrap_or(follower_id);

        Self {
            name: format!("User {suffix}"),
            avatar: format!("U{suffix}"),
            engagements: 0,
            is_student: false,
        }
    }

    pub fn named(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            engagements: 0,
            is_student: false,
        }
    }

    /// 距离转化阈值的进度，上限 1.0
    pub fn progress(&self, threshold: u32) -> f64 {
        if threshold == 0 {
            return 1.0;
        }
        (f64::from(self.engagements) / f64::from(threshold)).min(1.0)
    }

    /// 距离转化还差的互动次数
    pub fn remaining(&self, threshold: u32) -> u32 {
        threshold.saturating_sub(self.engagements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_route_by_type() {
        let mut counters = EngagementCounters::default();
        counters.increment(&EngagementType::Like);
        counters.increment(&EngagementType::Like);
        counters.increment(&EngagementType::Enrollment);
        counters.increment(&EngagementType::Other("bookmark".to_string()));

        assert_eq!(counters.likes, 2);
        assert_eq!(counters.enrollments, 1);
        assert_eq!(counters.other, 1);
        assert_eq!(counters.get(&EngagementType::Comment), 0);
        assert_eq!(counters.total(), 4);
    }

    #[test]
    fn test_placeholder_names() {
        let record = FollowerEngagementRecord::placeholder("follower_42");
        assert_eq!(record.name, "User 42");
        assert_eq!(record.avatar, "U42");
        assert_eq!(record.engagements, 0);
        assert!(!record.is_student);

        let bare = FollowerEngagementRecord::placeholder("f1");
        assert_eq!(bare.name, "User f1");
    }

    #[test]
    fn test_progress_and_remaining() {
        let mut record = FollowerEngagementRecord::named("Alex Rivera", "AR");
        record.engagements = 8;
        assert!((record.progress(10) - 0.8).abs() < f64::EPSILON);
        assert_eq!(record.remaining(10), 2);

        record.engagements = 15;
        assert_eq!(record.progress(10), 1.0);
        assert_eq!(record.remaining(10), 0);
    }

    #[test]
    fn test_engagement_data_missing_other_bucket() {
        // 旧快照没有 other 字段
        let counters: EngagementCounters =
            serde_json::from_str(r#"{"likes":3,"comments":1,"shares":0,"enrollments":2}"#).unwrap();
        assert_eq!(counters.likes, 3);
        assert_eq!(counters.other, 0);
    }
}
