//! 定时随机互动来源
//!
//! 每个 tick 以固定概率产生一次互动，类型在四种已知类型中随机选择，
//! 粉丝 ID 取自 `follower_0 .. follower_{pool-1}`。

use creator_core::RandomSource;
use creator_shared::config::SimulationConfig;
use creator_shared::events::{EngagementEvent, EngagementType};

use super::traits::EngagementSource;

#[derive(Debug, Clone)]
pub struct SimulatedEngagementSource {
    probability: f64,
    follower_pool: u32,
}

impl SimulatedEngagementSource {
    pub fn new(probability: f64, follower_pool: u32) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            follower_pool: follower_pool.max(1),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn follower_pool(&self) -> u32 {
        self.follower_pool
    }
}

impl Default for SimulatedEngagementSource {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for SimulatedEngagementSource {
    fn from(config: &SimulationConfig) -> Self {
        Self::new(config.event_probability, config.follower_pool)
    }
}

impl EngagementSource for SimulatedEngagementSource {
    fn name(&self) -> &str {
        "simulator"
    }

    fn next_event(&mut self, random: &mut RandomSource) -> Option<EngagementEvent> {
        if !random.chance(self.probability) {
            return None;
        }

        let engagement_type = random.pick(&EngagementType::KNOWN)?.clone();
        let follower = random.index(self.follower_pool as usize);
        Some(EngagementEvent::new(
            engagement_type,
            format!("follower_{follower}"),
            self.name(),
        ))
    }
}
