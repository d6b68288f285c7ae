//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。
//! 所有阈值（转化阈值、变现门槛等）在启动时加载一次，运行期只读。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 核心引擎配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 粉丝转化为学员所需的互动次数（>= 即转化）
    pub conversion_threshold: u32,
    /// 每次转化奖励的积分
    pub conversion_reward_points: u32,
    /// 通知列表最多保留的条数
    pub notification_capacity: usize,
    /// 模拟人脸验证的成功率
    pub verification_success_rate: f64,
    /// 最低提现金额
    pub min_withdrawal: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            conversion_threshold: 10,
            conversion_reward_points: 50,
            notification_capacity: 50,
            verification_success_rate: 0.9,
            min_withdrawal: 10.0,
        }
    }
}

/// 变现门槛配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonetizationConfig {
    pub min_followers: u64,
    pub min_engagements: u64,
    pub min_courses: u64,
}

impl Default for MonetizationConfig {
    fn default() -> Self {
        Self {
            min_followers: 1000,
            min_engagements: 100,
            min_courses: 3,
        }
    }
}

/// 模拟事件源配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 事件源轮询间隔（毫秒）
    pub tick_interval_ms: u64,
    /// 每次轮询产生事件的概率
    pub event_probability: f64,
    /// 模拟粉丝池大小，粉丝 ID 为 follower_0 .. follower_{pool-1}
    pub follower_pool: u32,
    /// 随机种子，设置后模拟结果可复现
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30_000,
            event_probability: 0.3,
            follower_pool: 100,
            seed: None,
        }
    }
}

/// 快照持久化配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// 快照文件目录
    pub dir: String,
    /// 快照键名
    pub key: String,
    /// 自动保存间隔（秒），多次变更合并为一次写入
    pub autosave_interval_secs: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            dir: ".creator-flow".to_string(),
            key: "creatorFlowState".to_string(),
            autosave_interval_secs: 10,
        }
    }
}

impl PersistenceConfig {
    /// 快照目录路径
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub engine: EngineConfig,
    pub monetization: MonetizationConfig,
    pub simulation: SimulationConfig,
    pub persistence: PersistenceConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（CREATOR_ 前缀，双下划线分隔层级，
    ///    如 CREATOR_ENGINE__CONVERSION_THRESHOLD -> engine.conversion_threshold）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        Self::load_from(service_name, Path::new(&config_dir))
    }

    /// 从指定目录加载配置
    pub fn load_from(service_name: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let env = std::env::var("CREATOR_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix("CREATOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
