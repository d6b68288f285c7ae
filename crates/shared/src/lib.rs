//! 共享库
//!
//! 包含各 crate 共用的配置、错误处理、行为事件信封和日志初始化代码。

pub mod config;
pub mod error;
pub mod events;
pub mod observability;
