//! 统一错误处理模块
//!
//! 定义系统中所有共享的错误类型，使用 thiserror 提供良好的错误信息。
//! 核心状态机中没有任何错误是致命的：调用方根据错误类别决定提示用户、
//! 记录日志还是回到空闲状态。

use thiserror::Error;

/// 系统错误类型
#[derive(Debug, Error)]
pub enum CreatorError {
    // ==================== 输入校验错误 ====================
    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("无效的参数: {field} - {message}")]
    InvalidArgument { field: String, message: String },

    // ==================== 查找错误 ====================
    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: String, id: String },

    // ==================== 持久化错误 ====================
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("快照存储错误: {0}")]
    Persistence(String),

    // ==================== 身份验证流程错误 ====================
    #[error("采集设备不可用: {reason}")]
    CaptureDenied { reason: String },

    #[error("验证流程状态不允许此操作: 当前 {current}, 操作 {operation}")]
    InvalidTransition { current: String, operation: String },

    // ==================== 业务规则错误 ====================
    #[error("操作被拒绝: {reason}")]
    ActionRejected { reason: String },

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, CreatorError>;

impl CreatorError {
    /// 构造未找到错误
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::CaptureDenied { .. } => "CAPTURE_DENIED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ActionRejected { .. } => "ACTION_REJECTED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为需要直接展示给用户的错误
    ///
    /// 校验失败、查找失败、设备拒绝和业务拒绝都对应界面上的提示；
    /// 持久化类错误只记录日志，状态继续在内存中运行。
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidArgument { .. }
                | Self::NotFound { .. }
                | Self::CaptureDenied { .. }
                | Self::ActionRejected { .. }
        )
    }

    /// 是否为持久化类错误
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_) | Self::Io(_) | Self::Persistence(_)
        )
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for CreatorError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
