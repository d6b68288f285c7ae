//! 通知已读状态

use creator_shared::error::Result;

use super::AppStateStore;

impl AppStateStore {
    /// 标记单条通知为已读，ID 不存在时返回 NotFound 且不修改状态
    pub fn mark_notification_read(&mut self, notification_id: &str) -> Result<()> {
        self.notifications.mark_read(notification_id)?;
        self.touch();
        Ok(())
    }

    /// 全部标记为已读，返回本次变更的条数
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let changed = self.notifications.mark_all_read();
        if changed > 0 {
            self.touch();
        }
        changed
    }
}
