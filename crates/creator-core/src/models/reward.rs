//! 奖励记录模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 奖励类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    /// 粉丝转化为学员
    Conversion,
    /// 里程碑达成
    Milestone,
}

impl RewardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversion => "conversion",
            Self::Milestone => "milestone",
        }
    }

    /// 奖励历史中展示的标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Conversion => "Student Conversion Reward",
            Self::Milestone => "Engagement Milestone",
        }
    }

    /// 解析历史筛选条件，"all" 或未知值返回 None 表示不过滤
    pub fn parse_filter(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "conversion" => Some(Self::Conversion),
            "milestone" => Some(Self::Milestone),
            _ => None,
        }
    }
}

/// 奖励记录
///
/// 创建后不可修改，历史列表按时间倒序（新记录插入头部）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RewardKind,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub date: DateTime<Utc>,
    pub icon: String,
}
