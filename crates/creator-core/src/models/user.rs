//! 创作者账户模型
//!
//! 用户资料同时承载身份信息和累计指标。累计指标只允许由互动记录、
//! 转化引擎、奖励引擎、变现评估以及显式的账户/课程操作修改。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 账户类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Creator,
    Student,
}

impl AccountType {
    /// 侧边栏与资料页展示的账户标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Creator => "Creator Account",
            Self::Student => "Student Account",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "creator" => Some(Self::Creator),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// 用户资料
///
/// 快照中以 camelCase 字段存储；加载时按字段覆盖，缺失字段保留当前值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: Option<String>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub account_type: Option<AccountType>,
    pub join_date: DateTime<Utc>,
    pub followers: u64,
    pub students: u64,
    pub courses: u64,
    pub total_earnings: f64,
    pub total_engagements: u64,
    /// 由互动转化而来的学员数，始终等于台账中 is_student 的记录数
    pub converted_students: u64,
    pub reward_points: u64,
    pub face_verification_enabled: bool,
    pub is_monetization_eligible: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            username: String::new(),
            email: String::new(),
            account_type: None,
            join_date: Utc::now(),
            followers: 0,
            students: 0,
            courses: 0,
            total_earnings: 0.0,
            total_engagements: 0,
            converted_students: 0,
            reward_points: 0,
            face_verification_enabled: true,
            is_monetization_eligible: false,
        }
    }
}

impl UserProfile {
    /// 侧边栏展示名，未登录时显示 "Creator"
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Creator"
        } else {
            &self.name
        }
    }

    pub fn is_creator(&self) -> bool {
        self.account_type == Some(AccountType::Creator)
    }
}
