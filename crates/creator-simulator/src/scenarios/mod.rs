//! 场景模块
//!
//! - `scenario` - 场景定义（Scenario）、步骤（ScenarioStep）和执行器（ScenarioRunner）
//! - `predefined` - 预定义的标准场景
//!
//! # 使用示例
//!
//! ```rust,ignore
//! let json = r#"{
//!     "name": "custom",
//!     "steps": [
//!         {"type": "engage", "follower_id": "f1", "engagement_type": "like"}
//!     ]
//! }"#;
//! let scenario = Scenario::from_json(json)?;
//! let result = ScenarioRunner::new(&mut store).run(&scenario).await;
//! ```

mod predefined;
mod scenario;

pub use predefined::PredefinedScenarios;
pub use scenario::{
    Scenario, ScenarioBuilder, ScenarioResult, ScenarioRunner, ScenarioStep, StepResult,
};
