//! 课程模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub students: u64,
    pub rating: f64,
    pub category: String,
    pub price: f64,
    pub engagements: u64,
}

impl Course {
    /// 由上传文件创建课程
    ///
    /// 标题为去掉最后一个扩展名的文件名，其余字段为空统计。
    pub fn from_upload(file_name: &str) -> Self {
        Self {
            id: format!("course_{}", Uuid::now_v7().simple()),
            title: strip_extension(file_name).to_string(),
            description: "Recently uploaded course".to_string(),
            students: 0,
            rating: 0.0,
            category: "Uncategorized".to_string(),
            price: 0.0,
            engagements: 0,
        }
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() && !file_name[idx + 1..].contains('/') => {
            &file_name[..idx]
        }
        _ => file_name,
    }
}
