//! CLI 模块
//!
//! - `simulate` - 定时模拟互动事件
//! - `engage` - 手动注入互动
//! - `scenario` - 运行预定义或自定义场景
//! - `seed` - 生成随机粉丝
//! - `status` - 查看状态
//! - `reset` - 清除快照
//!
//! # 使用示例
//!
//! ```bash
//! creator-sim --seed 7 simulate --ticks 200 --tick-ms 10
//! creator-sim engage -f f1 -t comment -c 10
//! creator-sim scenario -n first_conversion
//! creator-sim status --json
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
