//! 课程管理

use creator_shared::error::{CreatorError, Result};
use tracing::info;

use super::AppStateStore;
use crate::models::Course;

impl AppStateStore {
    /// 由上传文件创建课程
    pub fn add_course_from_upload(&mut self, file_name: &str) -> Course {
        let course = Course::from_upload(file_name);
        info!(course_id = %course.id, title = %course.title, "新增课程");
        self.courses.push(course.clone());
        self.sync_course_count();
        course
    }

    /// 删除课程，ID 不存在时返回 NotFound 且不做任何修改
    pub fn delete_course(&mut self, course_id: &str) -> Result<Course> {
        let idx = self
            .courses
            .iter()
            .position(|c| c.id == course_id)
            .ok_or_else(|| CreatorError::not_found("Course", course_id))?;

        let course = self.courses.remove(idx);
        info!(course_id = %course.id, title = %course.title, "删除课程");
        self.sync_course_count();
        Ok(course)
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    fn sync_course_count(&mut self) {
        self.user.courses = self.courses.len() as u64;
        self.refresh_eligibility();
        self.touch();
    }
}
