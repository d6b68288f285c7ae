//! 行为事件模型
//!
//! 定义互动事件的类型枚举与统一信封格式。事件可能来自模拟定时器、
//! 场景脚本或命令行，进入核心状态机前都包装成 `EngagementEvent`。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// EngagementType: 互动类型
// ---------------------------------------------------------------------------

/// 互动类型
///
/// 四种已知类型各自对应一个聚合计数器。未识别的类型不会被拒绝，
/// 而是落入 `Other`，计入通用计数桶。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EngagementType {
    Like,
    Comment,
    Share,
    Enrollment,
    Other(String),
}

impl EngagementType {
    /// 四种已知类型，供模拟事件源随机选择
    pub const KNOWN: [EngagementType; 4] = [
        EngagementType::Like,
        EngagementType::Comment,
        EngagementType::Share,
        EngagementType::Enrollment,
    ];

    /// 解析互动类型，永不失败
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "like" => Self::Like,
            "comment" => Self::Comment,
            "share" => Self::Share,
            "enrollment" => Self::Enrollment,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Share => "share",
            Self::Enrollment => "enrollment",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// 通知列表使用的图标
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Like => "fas fa-thumbs-up",
            Self::Comment => "fas fa-comments",
            Self::Share => "fas fa-share",
            Self::Enrollment => "fas fa-user-plus",
            Self::Other(_) => "fas fa-heart",
        }
    }
}

impl fmt::Display for EngagementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngagementType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

// 线上格式是小写字符串，未知类型原样保留
impl Serialize for EngagementType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EngagementType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

// ---------------------------------------------------------------------------
// EngagementEvent: 事件信封
// ---------------------------------------------------------------------------

/// 互动事件信封
///
/// `event_id` 使用 UUID v7，时间有序，便于在日志中按顺序追溯。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEvent {
    pub event_id: String,
    pub engagement_type: EngagementType,
    pub follower_id: String,
    pub timestamp: DateTime<Utc>,
    /// 事件来源（simulator / scenario / cli）
    pub source: String,
}

impl EngagementEvent {
    pub fn new(
        engagement_type: EngagementType,
        follower_id: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7().to_string(),
            engagement_type,
            follower_id: follower_id.into(),
            timestamp: Utc::now(),
            source: source.into(),
        }
    }
}
