//! 预定义场景集合
//!
//! 覆盖转化、变现门槛和演示会话等常见流程，可直接用于演示和回归测试。

use creator_shared::events::EngagementType;

use super::scenario::{Scenario, ScenarioStep};

pub struct PredefinedScenarios;

impl PredefinedScenarios {
    /// 首次转化场景
    ///
    /// 粉丝 f1 点赞 9 次仍是粉丝，第 10 次点赞后转化为学员。
    pub fn first_conversion() -> Scenario {
        Scenario::builder("first_conversion")
            .description("首次转化：f1 点赞 9 次未转化，第 10 次转化为学员")
            .engage_times("f1", "like", 9)
            .expect_student("f1", false)
            .engage("f1", "like")
            .expect_student("f1", true)
            .build()
    }

    /// 变现门槛场景
    ///
    /// 粉丝 1000、互动 100、课程 2 门时不具备资格，上传第 3 门课程后解锁。
    pub fn monetization_gap() -> Scenario {
        let fans: Vec<ScenarioStep> = ["like", "comment", "share", "enrollment"]
            .iter()
            .enumerate()
            .map(|(i, kind)| ScenarioStep::Engage {
                follower_id: format!("fan_{i}"),
                engagement_type: EngagementType::parse(kind),
                delay_ms: None,
            })
            .collect();

        Scenario::builder("monetization_gap")
            .description("变现门槛：缺一门课程时不可变现，补齐后解锁")
            .set_followers(1000)
            .step(ScenarioStep::Repeat {
                count: 25,
                steps: fans,
            })
            .add_course("Intro to Rust.mp4")
            .add_course("Ownership Deep Dive.mp4")
            .expect_eligible(false)
            .add_course("Async Patterns.mp4")
            .expect_eligible(true)
            .build()
    }

    /// 演示会话场景
    ///
    /// 跳过欢迎页载入演示数据，Alex Rivera 再互动两次完成转化。
    pub fn demo_session() -> Scenario {
        Scenario::builder("demo_session")
            .description("演示会话：载入演示数据，推动 Alex Rivera 完成转化")
            .skip_welcome()
            .expect_student("1", false)
            .engage("1", "like")
            .engage("1", "comment")
            .expect_student("1", true)
            .expect_student("4", true)
            .build()
    }

    /// 互动爆发场景
    ///
    /// 四名粉丝轮流进行四种互动各 12 轮，全部完成转化。
    pub fn engagement_burst() -> Scenario {
        let round = ["like", "comment", "share", "enrollment"]
            .iter()
            .enumerate()
            .map(|(i, kind)| ScenarioStep::Engage {
                follower_id: format!("burst_{i}"),
                engagement_type: EngagementType::parse(kind),
                delay_ms: None,
            })
            .collect();

        let mut builder = Scenario::builder("engagement_burst")
            .description("互动爆发：四名粉丝同时达到转化阈值")
            .step(ScenarioStep::Repeat {
                count: 12,
                steps: round,
            });
        for i in 0..4 {
            builder = builder.expect_student(format!("burst_{i}"), true);
        }
        builder.build()
    }

    pub fn all() -> Vec<Scenario> {
        vec![
            Self::first_conversion(),
            Self::monetization_gap(),
            Self::demo_session(),
            Self::engagement_burst(),
        ]
    }

    /// 根据名称获取场景
    pub fn get(name: &str) -> Option<Scenario> {
        match name {
            "first_conversion" => Some(Self::first_conversion()),
            "monetization_gap" => Some(Self::monetization_gap()),
            "demo_session" => Some(Self::demo_session()),
            "engagement_burst" => Some(Self::engagement_burst()),
            _ => None,
        }
    }

    pub fn names() -> Vec<&'static str> {
        vec![
            "first_conversion",
            "monetization_gap",
            "demo_session",
            "engagement_burst",
        ]
    }
}
