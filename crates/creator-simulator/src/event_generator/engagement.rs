//! 固定类型的互动事件生成器

use creator_shared::events::{EngagementEvent, EngagementType};

use super::traits::EventGenerator;

/// 按固定互动类型生成事件，CLI `engage` 命令使用
pub struct EngagementEventGenerator {
    engagement_type: EngagementType,
    source: String,
}

impl EngagementEventGenerator {
    pub fn new(engagement_type: EngagementType, source: impl Into<String>) -> Self {
        Self {
            engagement_type,
            source: source.into(),
        }
    }

    pub fn like() -> Self {
        Self::new(EngagementType::Like, "cli")
    }
}

impl EventGenerator for EngagementEventGenerator {
    fn generate(&self, follower_id: &str) -> EngagementEvent {
        EngagementEvent::new(self.engagement_type.clone(), follower_id, self.source.clone())
    }

    fn engagement_type(&self) -> EngagementType {
        self.engagement_type.clone()
    }
}
