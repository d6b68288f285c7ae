//! 通知中心
//!
//! 根据领域事件生成通知条目，新通知插入头部，超出容量时淘汰最旧的条目。

use chrono::{DateTime, Utc};
use creator_shared::error::{CreatorError, Result};
use uuid::Uuid;

use crate::models::{NotificationBadges, NotificationDraft, NotificationEntry, NotificationKind};

/// 默认通知容量
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCenter {
    entries: Vec<NotificationEntry>,
    capacity: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationCenter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 发布通知，返回新条目 ID
    pub fn push(&mut self, draft: NotificationDraft, now: DateTime<Utc>) -> String {
        let entry = NotificationEntry {
            id: format!("notif_{}", Uuid::now_v7().simple()),
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            time: now,
            unread: true,
            icon: draft.icon,
        };
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        id
    }

    pub fn mark_read(&mut self, id: &str) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CreatorError::not_found("Notification", id))?;
        entry.unread = false;
        Ok(())
    }

    /// 全部标记已读，返回本次改变的条数
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|n| n.unread) {
            entry.unread = false;
            changed += 1;
        }
        changed
    }

    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| n.unread).count()
    }

    pub fn badges(&self) -> NotificationBadges {
        let unread_of = |kind: NotificationKind| {
            self.entries
                .iter()
                .filter(|n| n.unread && n.kind == kind)
                .count()
        };
        NotificationBadges {
            total_unread: self.unread_count(),
            engagement_unread: unread_of(NotificationKind::Engagement),
            conversion_unread: unread_of(NotificationKind::Conversion),
        }
    }

    /// 用快照内容整体替换，超出容量的部分截断
    pub(crate) fn replace(&mut self, mut entries: Vec<NotificationEntry>) {
        entries.truncate(self.capacity);
        self.entries = entries;
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
