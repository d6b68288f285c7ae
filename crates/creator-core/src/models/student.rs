//! 学员模型
//!
//! 学员记录在粉丝转化的那一刻创建，每个粉丝最多一条，正常流程中不删除。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 学员 ID 前缀，与粉丝 ID 组合得到学员 ID
pub const STUDENT_ID_PREFIX: &str = "student_";

/// 由粉丝 ID 推导学员 ID
pub fn student_id_for(follower_id: &str) -> String {
    format!("{STUDENT_ID_PREFIX}{follower_id}")
}

/// 学员记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub join_date: NaiveDate,
    pub courses_enrolled: u32,
    /// 互动率百分比
    pub engagement_rate: u32,
    pub is_converted: bool,
    pub total_engagements: u32,
}

impl StudentRecord {
    /// 根据展示名生成演示邮箱：小写，第一个空格替换为点
    pub fn demo_email(name: &str) -> String {
        format!("{}@email.com", name.to_lowercase().replacen(' ', ".", 1))
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}

/// 学员列表筛选条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentFilter {
    #[default]
    All,
    /// 由粉丝转化而来
    Converted,
    /// 至少报名一门课程
    Enrolled,
    /// 互动率高于 80%
    Active,
}

impl StudentFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "converted" => Self::Converted,
            "enrolled" => Self::Enrolled,
            "active" => Self::Active,
            _ => Self::All,
        }
    }

    pub fn accepts(&self, student: &StudentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Converted => student.is_converted,
            Self::Enrolled => student.courses_enrolled > 0,
            Self::Active => student.engagement_rate > 80,
        }
    }
}

/// 导出格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentExport {
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub courses_enrolled: u32,
    pub engagement_rate: u32,
    pub is_converted: bool,
}

impl From<&StudentRecord> for StudentExport {
    fn from(student: &StudentRecord) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            join_date: student.join_date,
            courses_enrolled: student.courses_enrolled,
            engagement_rate: student.engagement_rate,
            is_converted: student.is_converted,
        }
    }
}

/// 学员统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStats {
    pub active_students: usize,
    pub new_this_month: usize,
    /// 平均互动率，四舍五入为整数
    pub avg_engagement_rate: u32,
}
