//! 屏幕与分区导航模型

use serde::{Deserialize, Serialize};

/// 顶层屏幕
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Welcome,
    AccountType,
    Login,
    Signup,
    Dashboard,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::AccountType => "account-type",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Dashboard => "dashboard",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "welcome" => Some(Self::Welcome),
            "account-type" => Some(Self::AccountType),
            "login" => Some(Self::Login),
            "signup" => Some(Self::Signup),
            "dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }
}

/// 仪表盘内的分区
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Dashboard,
    Engagement,
    Courses,
    Students,
    Analytics,
    Rewards,
    Monetization,
    Messages,
    Profile,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Dashboard,
        Section::Engagement,
        Section::Courses,
        Section::Students,
        Section::Analytics,
        Section::Rewards,
        Section::Monetization,
        Section::Messages,
        Section::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Engagement => "engagement",
            Self::Courses => "courses",
            Self::Students => "students",
            Self::Analytics => "analytics",
            Self::Rewards => "rewards",
            Self::Monetization => "monetization",
            Self::Messages => "messages",
            Self::Profile => "profile",
        }
    }

    /// 页面标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Engagement => "Engagement Tracking",
            Self::Courses => "Course Management",
            Self::Students => "Student Management",
            Self::Analytics => "Analytics",
            Self::Rewards => "Rewards & Achievements",
            Self::Monetization => "Monetization Center",
            Self::Messages => "Messages",
            Self::Profile => "Profile Settings",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw.trim())
    }
}
