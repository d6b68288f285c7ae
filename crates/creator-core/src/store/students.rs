//! 学员查询与导出

use chrono::{Datelike, NaiveDate};
use creator_shared::error::Result;

use super::AppStateStore;
use crate::models::{StudentExport, StudentFilter, StudentRecord, StudentStats};

impl AppStateStore {
    pub fn find_student(&self, student_id: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.id == student_id)
    }

    /// 按名称或邮箱搜索，不区分大小写
    pub fn search_students(&self, query: &str) -> Vec<&StudentRecord> {
        self.students
            .iter()
            .filter(|s| s.matches_query(query))
            .collect()
    }

    pub fn filter_students(&self, filter: StudentFilter) -> Vec<&StudentRecord> {
        self.students.iter().filter(|s| filter.accepts(s)).collect()
    }

    pub fn student_stats(&self, today: NaiveDate) -> StudentStats {
        let new_this_month = self
            .students
            .iter()
            .filter(|s| s.join_date.year() == today.year() && s.join_date.month() == today.month())
            .count();

        let avg_engagement_rate = if self.students.is_empty() {
            0
        } else {
            let sum: u64 = self.students.iter().map(|s| u64::from(s.engagement_rate)).sum();
            (sum as f64 / self.students.len() as f64).round() as u32
        };

        StudentStats {
            active_students: self.students.len(),
            new_this_month,
            avg_engagement_rate,
        }
    }

    /// 导出学员列表（格式化 JSON）
    pub fn export_students(&self) -> Result<String> {
        let rows: Vec<StudentExport> = self.students.iter().map(StudentExport::from).collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }
}
