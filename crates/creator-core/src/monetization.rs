//! 变现资格评估
//!
//! 资格是粉丝数、互动总数、课程数三项门槛的与运算，每次相关字段变化后重新计算，不做缓存。

use creator_shared::config::MonetizationConfig;
use serde::Serialize;

use crate::models::UserProfile;

/// 变现门槛，启动时从配置读取，运行期只读
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetizationRequirements {
    pub min_followers: u64,
    pub min_engagements: u64,
    pub min_courses: u64,
}

impl Default for MonetizationRequirements {
    fn default() -> Self {
        Self::from(&MonetizationConfig::default())
    }
}

impl From<&MonetizationConfig> for MonetizationRequirements {
    fn from(config: &MonetizationConfig) -> Self {
        Self {
            min_followers: config.min_followers,
            min_engagements: config.min_engagements,
            min_courses: config.min_courses,
        }
    }
}

/// 单项门槛进度
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RequirementProgress {
    pub current: u64,
    pub required: u64,
    pub met: bool,
    /// min(current / required, 1.0)
    pub ratio: f64,
}

impl RequirementProgress {
    pub fn new(current: u64, required: u64) -> Self {
        let ratio = if required == 0 {
            1.0
        } else {
            (current as f64 / required as f64).min(1.0)
        };
        Self {
            current,
            required,
            met: current >= required,
            ratio,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.required.saturating_sub(self.current)
    }

    /// 进度百分比
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub followers: RequirementProgress,
    pub engagements: RequirementProgress,
    pub courses: RequirementProgress,
}

impl EligibilityReport {
    /// 解锁变现还差的粉丝数
    pub fn followers_remaining(&self) -> u64 {
        self.followers.remaining()
    }
}

pub struct MonetizationEvaluator;

impl MonetizationEvaluator {
    pub fn evaluate(user: &UserProfile, requirements: &MonetizationRequirements) -> EligibilityReport {
        let followers = RequirementProgress::new(user.followers, requirements.min_followers);
        let engagements =
            RequirementProgress::new(user.total_engagements, requirements.min_engagements);
        let courses = RequirementProgress::new(user.courses, requirements.min_courses);

        EligibilityReport {
            eligible: followers.met && engagements.met && courses.met,
            followers,
            engagements,
            courses,
        }
    }
}
