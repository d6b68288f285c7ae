//! 模拟器错误类型

use creator_shared::error::CreatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("未找到场景: {0}")]
    ScenarioNotFound(String),

    #[error("不支持的场景文件格式: {0}")]
    UnsupportedFormat(String),

    #[error("场景 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("场景 YAML 解析失败: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CreatorError),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
