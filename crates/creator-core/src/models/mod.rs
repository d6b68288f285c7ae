//! 领域数据模型
//!
//! 包含用户资料、互动台账记录、学员、课程、奖励、通知与导航状态。
//! 所有模型以 camelCase 字段序列化，与本地快照格式一致。

pub mod course;
pub mod engagement;
pub mod navigation;
pub mod notification;
pub mod reward;
pub mod student;
pub mod user;

pub use course::Course;
pub use engagement::{EngagementCounters, FollowerEngagementRecord};
pub use navigation::{Screen, Section};
pub use notification::{NotificationBadges, NotificationDraft, NotificationEntry, NotificationKind};
pub use reward::{RewardEntry, RewardKind};
pub use student::{
    STUDENT_ID_PREFIX, StudentExport, StudentFilter, StudentRecord, StudentStats, student_id_for,
};
pub use user::{AccountType, UserProfile};
