//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use clap::{Parser, Subcommand};

/// Creator Flow 模拟工具
///
/// 全局选项需写在子命令之前，例如 `creator-sim --seed 7 simulate --ticks 100`。
#[derive(Parser, Debug)]
#[command(name = "creator-sim")]
#[command(version, about = "创作者互动 -> 转化 -> 奖励 状态机模拟工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，未指定时使用配置文件
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// 快照目录，覆盖 persistence.dir
    #[arg(long)]
    pub state_dir: Option<String>,

    /// 随机种子，设置后模拟结果可复现
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 运行定时模拟，按 Ctrl+C 停止
    Simulate {
        /// 运行的 tick 数，未指定时一直运行
        #[arg(long)]
        ticks: Option<u64>,

        /// tick 间隔（毫秒），覆盖 simulation.tick_interval_ms
        #[arg(long)]
        tick_ms: Option<u64>,

        /// 每个 tick 产生事件的概率
        #[arg(short, long)]
        probability: Option<f64>,
    },

    /// 手动注入互动事件
    ///
    /// 支持的类型：like, comment, share, enrollment，其他类型计入通用计数
    Engage {
        /// 粉丝 ID
        #[arg(short, long)]
        follower_id: String,

        /// 互动类型
        #[arg(short = 't', long, default_value = "like")]
        engagement_type: String,

        /// 注入次数
        #[arg(short, long, default_value = "1")]
        count: u32,
    },

    /// 运行预定义场景或场景文件
    ///
    /// 使用 `--name list` 列出所有可用场景。
    Scenario {
        /// 场景名称（使用 "list" 列出所有场景）
        #[arg(short, long)]
        name: String,

        /// 粉丝 ID（覆盖场景中的默认值）
        #[arg(short, long)]
        follower_id: Option<String>,

        /// 场景配置文件路径（JSON/YAML）
        #[arg(long)]
        file: Option<String>,
    },

    /// 生成带随机姓名的粉丝及其互动
    Seed {
        /// 粉丝数量
        #[arg(short, long, default_value = "20")]
        followers: usize,

        /// 每名粉丝的最大互动次数
        #[arg(long, default_value = "12")]
        max_engagements: u32,

        /// 先以创作者身份载入演示数据
        #[arg(long)]
        demo: bool,
    },

    /// 查看当前状态
    Status {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 清除已保存的快照
    Reset,
}
