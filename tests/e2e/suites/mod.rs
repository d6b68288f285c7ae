//! 测试套件模块
//!
//! 按业务功能组织的测试用例集合。

pub mod account_session;
pub mod conversion_flow;
pub mod monetization;
pub mod persistence;
pub mod simulator;
pub mod verification;
