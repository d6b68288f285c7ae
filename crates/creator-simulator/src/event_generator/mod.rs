//! 事件来源模块
//!
//! 提供驱动核心状态机的互动事件：定时随机来源、脚本回放来源和固定类型生成器。
//! 生成的事件符合 creator_shared::events 定义的信封格式。

mod engagement;
mod scripted;
mod simulated;
mod traits;

pub use engagement::EngagementEventGenerator;
pub use scripted::ScriptedSource;
pub use simulated::SimulatedEngagementSource;
pub use traits::{EngagementSource, EventGenerator};

use creator_shared::events::{EngagementEvent, EngagementType};

/// 快速生成一条互动事件
///
/// 类型字符串不区分大小写，未知类型原样保留。
pub fn quick_engagement_event(engagement_type: &str, follower_id: &str) -> EngagementEvent {
    EngagementEvent::new(EngagementType::parse(engagement_type), follower_id, "cli")
}
