//! 事件来源 trait 定义
//!
//! 两类接口：
//! - `EventGenerator`：为指定粉丝生成固定类型的事件，纯计算
//! - `EngagementSource`：由运行循环在每个 tick 轮询，可能不产生事件

use creator_core::RandomSource;
use creator_shared::events::{EngagementEvent, EngagementType};

/// 事件生成器 trait
pub trait EventGenerator: Send + Sync {
    /// 生成单个事件
    fn generate(&self, follower_id: &str) -> EngagementEvent;

    /// 批量生成同类型事件
    fn generate_batch(&self, follower_id: &str, count: usize) -> Vec<EngagementEvent> {
        (0..count).map(|_| self.generate(follower_id)).collect()
    }

    /// 该生成器产生的互动类型
    fn engagement_type(&self) -> EngagementType;
}

/// 互动事件来源
///
/// 随机性统一来自调用方传入的 `RandomSource`，同一种子下事件序列可复现。
pub trait EngagementSource: Send {
    /// 来源名称，用于日志
    fn name(&self) -> &str;

    /// 轮询下一个事件，本次不产生事件时返回 None
    fn next_event(&mut self, random: &mut RandomSource) -> Option<EngagementEvent>;

    /// 来源是否已耗尽，耗尽后运行循环停止
    fn is_exhausted(&self) -> bool {
        false
    }
}
