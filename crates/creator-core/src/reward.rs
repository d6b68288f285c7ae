//! 奖励引擎
//!
//! 维护不可变的奖励历史（新记录在前），并同步累加用户积分。

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::{RewardEntry, RewardKind, UserProfile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardEngine {
    history: Vec<RewardEntry>,
}

impl RewardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_history(history: Vec<RewardEntry>) -> Self {
        Self { history }
    }

    /// 发放奖励
    ///
    /// 新记录插入历史头部，`user.reward_points` 增加相同积分。
    pub fn grant_reward(
        &mut self,
        user: &mut UserProfile,
        kind: RewardKind,
        points: u32,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &RewardEntry {
        let entry = RewardEntry {
            id: format!("reward_{}", Uuid::now_v7().simple()),
            kind,
            title: kind.title().to_string(),
            description: description.into(),
            points,
            date: now,
            icon: kind.as_str().to_string(),
        };

        user.reward_points += u64::from(points);
        info!(
            reward_id = %entry.id,
            kind = kind.as_str(),
            points,
            total_points = user.reward_points,
            "发放奖励"
        );

        self.history.insert(0, entry);
        &self.history[0]
    }

    pub fn history(&self) -> &[RewardEntry] {
        &self.history
    }

    /// 按类别筛选，None 表示全部
    pub fn filter(&self, kind: Option<RewardKind>) -> Vec<&RewardEntry> {
        self.history
            .iter()
            .filter(|entry| kind.is_none_or(|k| entry.kind == k))
            .collect()
    }

    /// 历史中的积分合计
    pub fn total_points(&self) -> u64 {
        self.history.iter().map(|e| u64::from(e.points)).sum()
    }

    pub(crate) fn replace(&mut self, history: Vec<RewardEntry>) {
        self.history = history;
    }

    pub(crate) fn clear(&mut self) {
        self.history.clear();
    }
}
