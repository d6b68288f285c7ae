//! 快照保存与加载

use creator_shared::error::Result;
use tracing::{debug, info, warn};

use super::AppStateStore;
use crate::ledger::EngagementLedger;
use crate::models::{EngagementCounters, UserProfile};
use crate::persistence::{AppSnapshot, SnapshotPatch, overlay};

impl AppStateStore {
    /// 当前状态的完整快照
    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            user: self.user.clone(),
            account_type: self.account_type,
            engagement_data: self.ledger.counters().clone(),
            follower_engagements: self.ledger.to_pairs(),
            courses: self.courses.clone(),
            students: self.students.clone(),
            notifications: self.notifications.entries().to_vec(),
            reward_history: self.rewards.history().to_vec(),
            current_screen: self.screen,
            current_section: self.section,
        }
    }

    /// 写快照，失败时返回错误
    pub fn try_save(&mut self) -> Result<()> {
        let json = self.snapshot().to_json()?;
        self.snapshots.write(&self.snapshot_key, &json)?;
        self.dirty = false;
        debug!(key = %self.snapshot_key, bytes = json.len(), "状态已保存");
        Ok(())
    }

    /// 写快照，失败只记录日志
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, key = %self.snapshot_key, "保存状态失败");
                false
            }
        }
    }

    /// 有未保存的修改时写快照
    pub fn save_if_dirty(&mut self) -> bool {
        self.dirty && self.save()
    }

    /// 从快照恢复状态
    ///
    /// 没有快照或快照无法解析时保持当前状态并返回 false。
    pub fn load(&mut self) -> bool {
        match self.try_load() {
            Ok(true) => true,
            Ok(false) => {
                debug!(key = %self.snapshot_key, "未找到已保存的状态");
                false
            }
            Err(e) => {
                warn!(error = %e, key = %self.snapshot_key, "加载状态失败，使用默认状态");
                false
            }
        }
    }

    /// 从快照恢复状态，错误向上返回
    pub fn try_load(&mut self) -> Result<bool> {
        let Some(raw) = self.snapshots.read(&self.snapshot_key)? else {
            return Ok(false);
        };
        let patch = SnapshotPatch::parse(&raw)?;
        self.apply_patch(patch)?;
        info!(
            key = %self.snapshot_key,
            followers_tracked = self.ledger.len(),
            students = self.students.len(),
            rewards = self.rewards.history().len(),
            "状态已加载"
        );
        Ok(true)
    }

    fn apply_patch(&mut self, patch: SnapshotPatch) -> Result<()> {
        // 先完成所有可能失败的合并，再整体替换
        let user: UserProfile = overlay(&self.user, patch.user.as_ref())?;
        let counters: EngagementCounters =
            overlay(self.ledger.counters(), patch.engagement_data.as_ref())?;
        let navigation = patch.navigation();

        self.user = user;
        self.account_type = patch.account_type;
        self.ledger = match patch.follower_engagements {
            Some(pairs) => EngagementLedger::from_pairs(counters, pairs),
            None => {
                let mut ledger = std::mem::take(&mut self.ledger);
                *ledger.counters_mut() = counters;
                ledger
            }
        };
        self.courses = patch.courses.unwrap_or_default();
        self.students = patch.students.unwrap_or_default();
        self.notifications
            .replace(patch.notifications.unwrap_or_default());
        self.rewards.replace(patch.reward_history.unwrap_or_default());

        if let Some((screen, section)) = navigation {
            self.screen = screen;
            self.section = section;
        }

        self.refresh_eligibility();
        self.dirty = false;
        Ok(())
    }

    /// 删除已保存的快照
    pub fn clear_saved_state(&mut self) -> Result<()> {
        self.snapshots.remove(&self.snapshot_key)
    }
}
