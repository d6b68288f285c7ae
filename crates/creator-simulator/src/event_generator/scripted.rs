//! 脚本化事件来源
//!
//! 按顺序回放预先给定的事件，每个 tick 一条，回放完毕即耗尽。

use std::collections::VecDeque;

use creator_core::RandomSource;
use creator_shared::events::{EngagementEvent, EngagementType};

use super::traits::EngagementSource;

#[derive(Debug, Default)]
pub struct ScriptedSource {
    events: VecDeque<EngagementEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = EngagementEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// 由 (类型, 粉丝 ID) 列表构造
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(pairs.into_iter().map(|(engagement_type, follower_id)| {
            EngagementEvent::new(EngagementType::parse(engagement_type), follower_id, "script")
        }))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EngagementSource for ScriptedSource {
    fn name(&self) -> &str {
        "script"
    }

    fn next_event(&mut self, _random: &mut RandomSource) -> Option<EngagementEvent> {
        self.events.pop_front()
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}
