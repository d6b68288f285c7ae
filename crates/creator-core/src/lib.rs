//! Creator Flow 核心状态机
//!
//! 负责 "互动 -> 转化 -> 奖励" 的完整链路：
//!
//! - **ledger**: 按粉丝记录互动次数，维护按类型聚合的计数器
//! - **conversion**: 粉丝互动达到阈值时转化为学员
//! - **reward**: 奖励历史与积分
//! - **monetization**: 变现资格评估
//! - **notification**: 通知中心
//! - **verification**: 敏感操作的人脸验证流程
//! - **store**: 聚合根 `AppStateStore`，串联以上组件并负责快照持久化
//!
//! 核心为同步代码，所有修改通过 `&mut AppStateStore` 完成。

pub mod account;
pub mod analytics;
pub mod clock;
pub mod conversion;
pub mod ledger;
pub mod models;
pub mod monetization;
pub mod notification;
pub mod persistence;
pub mod random;
pub mod reward;
pub mod store;
pub mod verification;

pub use clock::{Clock, FixedClock, SystemClock};
pub use conversion::{ConversionEngine, ConversionRecord};
pub use ledger::EngagementLedger;
pub use monetization::{EligibilityReport, MonetizationEvaluator, MonetizationRequirements};
pub use random::RandomSource;
pub use store::{
    ActionOutcome, ActiveConversion, AppStateStore, AutosaveMode, EngagementOutcome, StoreBuilder,
};
pub use verification::{SensitiveAction, VerificationStep, is_sensitive_action};
