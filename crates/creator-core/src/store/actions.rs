//! 敏感操作与人脸验证
//!
//! 开启人脸验证时，敏感操作先进入验证流程，验证成功后才执行；
//! 其他操作立即执行。

use creator_shared::error::{CreatorError, Result};
use serde::Serialize;
use tracing::info;

use super::AppStateStore;
use crate::verification::{SensitiveAction, VerificationStep};

/// 操作请求结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ActionOutcome {
    /// 已执行，附带提示信息
    Executed { action: String, message: String },
    /// 需要先完成人脸验证
    VerificationRequired { action: SensitiveAction },
}

impl ActionOutcome {
    fn executed(action: &str, message: impl Into<String>) -> Self {
        Self::Executed {
            action: action.to_string(),
            message: message.into(),
        }
    }
}

impl AppStateStore {
    /// 请求执行操作
    pub fn request_action(&mut self, action: &str) -> Result<ActionOutcome> {
        match SensitiveAction::parse(action) {
            Some(sensitive) if self.user.face_verification_enabled => {
                self.verification.begin(sensitive)?;
                Ok(ActionOutcome::VerificationRequired { action: sensitive })
            }
            _ => self.execute_action(action),
        }
    }

    /// 直接执行操作
    ///
    /// 提现要求收益不低于最低提现金额且具备变现资格，否则返回 ActionRejected。
    pub fn execute_action(&mut self, action: &str) -> Result<ActionOutcome> {
        let outcome = match SensitiveAction::parse(action) {
            Some(SensitiveAction::Withdraw) => {
                let min = self.engine.min_withdrawal;
                if self.user.total_earnings < min {
                    return Err(CreatorError::ActionRejected {
                        reason: format!("Minimum withdrawal amount is ${min}"),
                    });
                }
                if !self.eligibility().eligible {
                    return Err(CreatorError::ActionRejected {
                        reason: "Complete monetization requirements to withdraw".to_string(),
                    });
                }
                ActionOutcome::executed(action, "Withdrawal request submitted successfully!")
            }
            Some(SensitiveAction::AddPayment) => {
                ActionOutcome::executed(action, "Payment method feature coming soon!")
            }
            Some(SensitiveAction::ChangeAvatar) => {
                ActionOutcome::executed(action, "Profile picture updated successfully!")
            }
            Some(SensitiveAction::EditProfile) => {
                ActionOutcome::executed(action, "Profile editing feature coming soon!")
            }
            Some(SensitiveAction::ChangePassword) => {
                ActionOutcome::executed(action, "Password change feature coming soon!")
            }
            None => ActionOutcome::executed(action, format!("Action {action} executed")),
        };

        info!(action = %action, "执行操作");
        Ok(outcome)
    }

    // ==================== 人脸验证 ====================

    pub fn verification_step(&self) -> VerificationStep {
        self.verification.step()
    }

    pub fn pending_action(&self) -> Option<SensitiveAction> {
        self.verification.pending_action()
    }

    pub fn capture_device_active(&self) -> bool {
        self.verification.device_active()
    }

    pub fn start_verification(&mut self) -> Result<()> {
        self.verification.start()
    }

    pub fn capture_verification(&mut self) -> Result<()> {
        self.verification.capture()
    }

    /// 处理采集结果，成功率取自引擎配置
    pub fn process_verification(&mut self) -> Result<bool> {
        let rate = self.engine.verification_success_rate;
        self.verification.process(&mut self.random, rate)
    }

    pub fn retry_verification(&mut self) -> Result<()> {
        self.verification.retry()
    }

    /// 结束验证，成功时执行待处理的操作
    pub fn complete_verification(&mut self, success: bool) -> Result<Option<ActionOutcome>> {
        match self.verification.complete(success)? {
            Some(action) => self.execute_action(action.as_str()).map(Some),
            None => Ok(None),
        }
    }

    pub fn cancel_verification(&mut self) {
        self.verification.cancel();
    }

    pub fn toggle_face_verification(&mut self, enabled: bool) {
        self.user.face_verification_enabled = enabled;
        info!(enabled, "人脸验证开关");
        self.touch();
    }
}
