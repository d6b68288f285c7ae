//! 互动台账
//!
//! 按粉丝记录互动次数，并维护按类型聚合的计数器。
//! 粉丝记录保持插入顺序，快照中以有序的 `[followerId, record]` 数组保存。

use std::collections::HashMap;

use creator_shared::events::EngagementType;
use tracing::debug;

use crate::models::{EngagementCounters, FollowerEngagementRecord, UserProfile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementLedger {
    counters: EngagementCounters,
    entries: Vec<(String, FollowerEngagementRecord)>,
    index: HashMap<String, usize>,
}

impl EngagementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次互动
    ///
    /// 粉丝首次出现时创建占位记录；对应类型计数器、粉丝互动数和
    /// `user.total_engagements` 各加 1。未识别的类型计入 other，不会被拒绝。
    pub fn record_engagement(
        &mut self,
        follower_id: &str,
        engagement_type: &EngagementType,
        user: &mut UserProfile,
    ) -> FollowerEngagementRecord {
        self.counters.increment(engagement_type);
        user.total_engagements += 1;

        let idx = self.ensure_entry(follower_id);
        let record = &mut self.entries[idx].1;
        record.engagements += 1;

        debug!(
            follower_id = %follower_id,
            engagement_type = %engagement_type,
            engagements = record.engagements,
            "记录互动"
        );

        record.clone()
    }

    /// 登记一个带展示名的粉丝，不计入互动
    ///
    /// 已存在的粉丝只更新展示名和头像。
    pub fn register(
        &mut self,
        follower_id: &str,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> &FollowerEngagementRecord {
        let name = name.into();
        let avatar = avatar.into();
        let idx = match self.index.get(follower_id) {
            Some(&idx) => {
                let record = &mut self.entries[idx].1;
                record.name = name;
                record.avatar = avatar;
                idx
            }
            None => self.push(follower_id, FollowerEngagementRecord::named(name, avatar)),
        };
        &self.entries[idx].1
    }

    fn ensure_entry(&mut self, follower_id: &str) -> usize {
        match self.index.get(follower_id) {
            Some(&idx) => idx,
            None => self.push(follower_id, FollowerEngagementRecord::placeholder(follower_id)),
        }
    }

    fn push(&mut self, follower_id: &str, record: FollowerEngagementRecord) -> usize {
        let idx = self.entries.len();
        self.entries.push((follower_id.to_string(), record));
        self.index.insert(follower_id.to_string(), idx);
        idx
    }

    pub fn get(&self, follower_id: &str) -> Option<&FollowerEngagementRecord> {
        self.index.get(follower_id).map(|&idx| &self.entries[idx].1)
    }

    pub(crate) fn get_mut(&mut self, follower_id: &str) -> Option<&mut FollowerEngagementRecord> {
        match self.index.get(follower_id) {
            Some(&idx) => Some(&mut self.entries[idx].1),
            None => None,
        }
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FollowerEngagementRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn converted_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_student).count()
    }

    /// 正在转化中的粉丝：至少一次互动且尚未成为学员
    pub fn active_conversions(&self) -> impl Iterator<Item = (&str, &FollowerEngagementRecord)> {
        self.iter()
            .filter(|(_, record)| !record.is_student && record.engagements > 0)
    }

    pub fn counters(&self) -> &EngagementCounters {
        &self.counters
    }

    pub(crate) fn counters_mut(&mut self) -> &mut EngagementCounters {
        &mut self.counters
    }

    pub fn to_pairs(&self) -> Vec<(String, FollowerEngagementRecord)> {
        self.entries.clone()
    }

    /// 从有序数组重建台账
    ///
    /// 重复的 ID 保留首次出现的位置，记录取最后一次的值。
    pub fn from_pairs(
        counters: EngagementCounters,
        pairs: impl IntoIterator<Item = (String, FollowerEngagementRecord)>,
    ) -> Self {
        let mut ledger = Self {
            counters,
            ..Self::default()
        };
        for (id, record) in pairs {
            match ledger.index.get(&id) {
                Some(&idx) => ledger.entries[idx].1 = record,
                None => {
                    ledger.push(&id, record);
                }
            }
        }
        ledger
    }
}
