//! creator-sim 命令行入口

use anyhow::Context;
use clap::Parser;
use creator_shared::config::AppConfig;
use creator_shared::observability;
use creator_simulator::cli::{Cli, CommandRunner, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load("creator-simulator").context("加载配置失败")?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if let Some(dir) = cli.state_dir {
        config.persistence.dir = dir;
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }

    observability::init(&config.observability)?;

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Simulate {
            ticks,
            tick_ms,
            probability,
        } => {
            runner.run_simulate(ticks, tick_ms, probability).await?;
        }
        Commands::Engage {
            follower_id,
            engagement_type,
            count,
        } => {
            runner.run_engage(&follower_id, &engagement_type, count)?;
        }
        Commands::Scenario {
            name,
            follower_id,
            file,
        } => {
            runner.run_scenario(&name, follower_id, file).await?;
        }
        Commands::Seed {
            followers,
            max_engagements,
            demo,
        } => {
            runner.run_seed(followers, max_engagements, demo)?;
        }
        Commands::Status { json } => {
            runner.run_status(json)?;
        }
        Commands::Reset => {
            runner.run_reset()?;
        }
    }

    Ok(())
}
