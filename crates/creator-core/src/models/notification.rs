//! 通知模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 通知类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Conversion,
    Engagement,
    Milestone,
    System,
}

/// 通知记录
///
/// 除 `unread` 外不可修改，`unread` 只能通过标记已读改变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub time: DateTime<Utc>,
    pub unread: bool,
    pub icon: String,
}

/// 待发布的通知内容，由通知中心补齐 ID、时间和未读标记
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub icon: String,
}

impl NotificationDraft {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            icon: icon.into(),
        }
    }
}

/// 各入口的未读角标数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationBadges {
    pub total_unread: usize,
    pub engagement_unread: usize,
    pub conversion_unread: usize,
}
