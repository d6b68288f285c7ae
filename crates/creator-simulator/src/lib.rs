//! Creator Flow 模拟器
//!
//! 为核心状态机提供事件来源和运行环境，用于开发、演示和测试。
//!
//! # 主要模块
//!
//! - `event_generator`: 互动事件来源（定时随机源、脚本源）
//! - `scenarios`: 场景定义、执行器和预定义场景
//! - `runtime`: 异步运行循环，合并自动保存
//! - `cli`: `creator-sim` 命令行
//!
//! # 使用示例
//!
//! ```rust
//! use creator_core::AppStateStore;
//! use creator_simulator::scenarios::{PredefinedScenarios, ScenarioRunner};
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .unwrap();
//! let mut store = AppStateStore::builder().seed(1).build();
//! let scenario = PredefinedScenarios::first_conversion();
//! let result = rt.block_on(ScenarioRunner::new(&mut store).run(&scenario));
//! assert!(result.is_all_success());
//! assert!(store.find_student("student_f1").is_some());
//! ```

pub mod cli;
pub mod error;
pub mod event_generator;
pub mod runtime;
pub mod scenarios;
