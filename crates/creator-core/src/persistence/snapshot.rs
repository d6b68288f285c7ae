//! 应用状态快照格式
//!
//! 保存时输出完整快照；加载时先把整份 JSON 解析为 [`SnapshotPatch`]，
//! 全部字段解析成功后才应用，解析失败不会留下半更新的状态。

use creator_shared::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{
    AccountType, Course, EngagementCounters, FollowerEngagementRecord, NotificationEntry,
    RewardEntry, Screen, Section, StudentRecord, UserProfile,
};

/// 持久化快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub user: UserProfile,
    pub account_type: Option<AccountType>,
    pub engagement_data: EngagementCounters,
    /// 有序的 `[followerId, record]` 数组
    pub follower_engagements: Vec<(String, FollowerEngagementRecord)>,
    pub courses: Vec<Course>,
    pub students: Vec<StudentRecord>,
    pub notifications: Vec<NotificationEntry>,
    pub reward_history: Vec<RewardEntry>,
    pub current_screen: Screen,
    pub current_section: Section,
}

impl AppSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// 加载用的快照补丁
///
/// `user` 与 `engagementData` 按字段覆盖；集合字段整体替换，缺失即为空；
/// 台账缺失时保留当前台账。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotPatch {
    pub user: Option<Map<String, Value>>,
    pub account_type: Option<AccountType>,
    pub engagement_data: Option<Map<String, Value>>,
    pub follower_engagements: Option<Vec<(String, FollowerEngagementRecord)>>,
    pub courses: Option<Vec<Course>>,
    pub students: Option<Vec<StudentRecord>>,
    pub notifications: Option<Vec<NotificationEntry>>,
    pub reward_history: Option<Vec<RewardEntry>>,
    pub current_screen: Option<Screen>,
    pub current_section: Option<Section>,
}

impl SnapshotPatch {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 需要恢复的导航位置，欢迎页不恢复
    pub fn navigation(&self) -> Option<(Screen, Section)> {
        match self.current_screen {
            Some(screen) if screen != Screen::Welcome => {
                Some((screen, self.current_section.unwrap_or_default()))
            }
            _ => None,
        }
    }
}

/// 按字段把补丁覆盖到当前值上，补丁中没有的字段保持不变
pub fn overlay<T>(current: &T, patch: Option<&Map<String, Value>>) -> Result<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(patch) = patch else {
        return Ok(current.clone());
    };

    let mut merged = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}
