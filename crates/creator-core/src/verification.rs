//! 人脸验证流程
//!
//! 敏感操作在开启人脸验证时需要经过多步状态机：
//! Idle -> Prompt -> Capturing -> Processing -> Result -> Idle。
//! 采集设备在任何退出路径上都会被释放。

use std::fmt;

use creator_shared::error::{CreatorError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::random::RandomSource;

/// 需要人脸验证的敏感操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensitiveAction {
    Withdraw,
    AddPayment,
    ChangeAvatar,
    EditProfile,
    ChangePassword,
}

impl SensitiveAction {
    pub const ALL: [SensitiveAction; 5] = [
        SensitiveAction::Withdraw,
        SensitiveAction::AddPayment,
        SensitiveAction::ChangeAvatar,
        SensitiveAction::EditProfile,
        SensitiveAction::ChangePassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Withdraw => "withdraw",
            Self::AddPayment => "add-payment",
            Self::ChangeAvatar => "change-avatar",
            Self::EditProfile => "edit-profile",
            Self::ChangePassword => "change-password",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == raw.trim())
    }
}

impl fmt::Display for SensitiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_sensitive_action(action: &str) -> bool {
    SensitiveAction::parse(action).is_some()
}

/// 验证步骤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "step")]
pub enum VerificationStep {
    #[default]
    Idle,
    /// 已提示用户，等待开始
    Prompt,
    /// 采集设备已打开
    Capturing,
    Processing,
    Result { success: bool },
}

impl VerificationStep {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Prompt => "prompt",
            Self::Capturing => "capturing",
            Self::Processing => "processing",
            Self::Result { .. } => "result",
        }
    }
}

/// 采集设备
///
/// 真实实现对应摄像头，这里只需要获取/释放语义。
#[cfg_attr(test, mockall::automock)]
pub trait CaptureDevice: Send {
    fn acquire(&mut self) -> Result<()>;
    fn release(&mut self);
    fn is_active(&self) -> bool;
}

/// 模拟采集设备
#[derive(Debug, Clone, Default)]
pub struct SimulatedCaptureDevice {
    active: bool,
    deny: bool,
}

impl SimulatedCaptureDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// 总是拒绝访问的设备
    pub fn denying() -> Self {
        Self {
            active: false,
            deny: true,
        }
    }
}

impl CaptureDevice for SimulatedCaptureDevice {
    fn acquire(&mut self) -> Result<()> {
        if self.deny {
            return Err(CreatorError::CaptureDenied {
                reason: "Camera access is required for face verification".to_string(),
            });
        }
        self.active = true;
        Ok(())
    }

    fn release(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// 人脸验证状态机
pub struct VerificationFlow {
    step: VerificationStep,
    pending: Option<SensitiveAction>,
    device: Box<dyn CaptureDevice>,
}

impl fmt::Debug for VerificationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationFlow")
            .field("step", &self.step)
            .field("pending", &self.pending)
            .field("device_active", &self.device.is_active())
            .finish()
    }
}

impl Default for VerificationFlow {
    fn default() -> Self {
        Self::new(Box::new(SimulatedCaptureDevice::new()))
    }
}

impl VerificationFlow {
    pub fn new(device: Box<dyn CaptureDevice>) -> Self {
        Self {
            step: VerificationStep::Idle,
            pending: None,
            device,
        }
    }

    pub fn step(&self) -> VerificationStep {
        self.step
    }

    pub fn pending_action(&self) -> Option<SensitiveAction> {
        self.pending
    }

    pub fn device_active(&self) -> bool {
        self.device.is_active()
    }

    fn invalid(&self, operation: &str) -> CreatorError {
        CreatorError::InvalidTransition {
            current: self.step.name().to_string(),
            operation: operation.to_string(),
        }
    }

    /// 为敏感操作打开验证提示
    pub fn begin(&mut self, action: SensitiveAction) -> Result<()> {
        if self.step != VerificationStep::Idle {
            return Err(self.invalid("begin"));
        }
        self.pending = Some(action);
        self.step = VerificationStep::Prompt;
        debug!(action = %action, "等待人脸验证");
        Ok(())
    }

    /// 打开采集设备
    ///
    /// 设备拒绝访问时回到 Idle 并清除待执行操作。
    pub fn start(&mut self) -> Result<()> {
        match self.step {
            VerificationStep::Prompt | VerificationStep::Result { success: false } => {}
            _ => return Err(self.invalid("start")),
        }

        if let Err(e) = self.device.acquire() {
            warn!(error = %e, "采集设备获取失败，终止验证");
            self.reset();
            return Err(e);
        }
        self.step = VerificationStep::Capturing;
        Ok(())
    }

    /// 拍摄并关闭设备
    pub fn capture(&mut self) -> Result<()> {
        if self.step != VerificationStep::Capturing {
            return Err(self.invalid("capture"));
        }
        self.device.release();
        self.step = VerificationStep::Processing;
        Ok(())
    }

    /// 处理采集结果，按成功率随机判定
    pub fn process(&mut self, random: &mut RandomSource, success_rate: f64) -> Result<bool> {
        if self.step != VerificationStep::Processing {
            return Err(self.invalid("process"));
        }
        let success = random.chance(success_rate);
        self.step = VerificationStep::Result { success };
        info!(success, "人脸验证完成");
        Ok(success)
    }

    /// 验证失败后重试
    pub fn retry(&mut self) -> Result<()> {
        if !matches!(self.step, VerificationStep::Result { success: false }) {
            return Err(self.invalid("retry"));
        }
        self.start()
    }

    /// 结束验证，成功时返回待执行的操作
    ///
    /// 只有调用方确认成功且记录的结果也为成功时才返回操作。
    pub fn complete(&mut self, success: bool) -> Result<Option<SensitiveAction>> {
        let verified = match self.step {
            VerificationStep::Result { success: recorded } => recorded,
            _ => return Err(self.invalid("complete")),
        };
        if success && !verified {
            warn!("验证结果为失败，丢弃待执行操作");
        }
        let pending = self.pending;
        self.reset();
        Ok(pending.filter(|_| success && verified))
    }

    /// 任意步骤取消，释放设备并回到 Idle
    pub fn cancel(&mut self) {
        if self.step != VerificationStep::Idle {
            debug!(step = self.step.name(), "取消人脸验证");
        }
        self.reset();
    }

    fn reset(&mut self) {
        if self.device.is_active() {
            self.device.release();
        }
        self.pending = None;
        self.step = VerificationStep::Idle;
    }
}

impl Drop for VerificationFlow {
    fn drop(&mut self) {
        if self.device.is_active() {
            self.device.release();
        }
    }
}
