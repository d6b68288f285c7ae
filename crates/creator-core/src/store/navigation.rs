//! 屏幕与分区切换

use tracing::debug;

use super::AppStateStore;
use crate::models::{Screen, Section};

impl AppStateStore {
    pub fn switch_screen(&mut self, screen: Screen) {
        debug!(from = self.screen.as_str(), to = screen.as_str(), "切换屏幕");
        self.screen = screen;
        self.touch();
    }

    pub fn show_section(&mut self, section: Section) {
        debug!(section = section.as_str(), "切换分区");
        self.section = section;
        self.touch();
    }

    /// 当前页面标题
    pub fn page_title(&self) -> &'static str {
        self.section.title()
    }
}
