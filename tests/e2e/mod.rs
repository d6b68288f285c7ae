//! Creator Flow 端到端测试
//!
//! 跨 crate 覆盖完整的业务流程：
//! - 互动 -> 转化 -> 奖励
//! - 变现资格
//! - 快照持久化与重启恢复
//! - 敏感操作的人脸验证
//! - 账户会话（登录、演示数据、登出）
//! - 模拟器（运行循环、场景、命令行）

pub mod helpers;
pub mod setup;
pub mod suites;

pub use setup::TestEnvironment;
