//! 测试环境管理
//!
//! 每个测试独占一个临时快照目录，互不干扰；目录随 `TestEnvironment` 一起删除。

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use creator_core::persistence::FileSnapshotStore;
use creator_core::{AppStateStore, AutosaveMode, FixedClock, StoreBuilder};
use creator_shared::config::AppConfig;
use creator_simulator::cli::CommandRunner;
use tempfile::TempDir;

pub struct TestEnvironment {
    dir: TempDir,
    config: AppConfig,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let mut config = AppConfig::default();
        config.persistence.dir = dir.path().to_string_lossy().into_owned();
        config.simulation.seed = Some(2024);
        Self { dir, config }
    }

    /// 固定测试时间
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn builder(&self) -> StoreBuilder {
        StoreBuilder::from_config(&self.config)
            .clock(Arc::new(FixedClock(Self::now())))
            .snapshot_store(Arc::new(FileSnapshotStore::new(self.dir.path())))
    }

    /// 立即保存模式的存储，行为与交互式会话一致
    pub fn store(&self) -> AppStateStore {
        self.builder().build()
    }

    pub fn deferred_store(&self) -> AppStateStore {
        self.builder().autosave(AutosaveMode::Deferred).build()
    }

    /// 模拟重启：新建存储并从快照恢复
    pub fn reopen(&self) -> AppStateStore {
        let mut store = self.store();
        assert!(store.load(), "快照应当存在且可解析");
        store
    }

    pub fn runner(&self) -> CommandRunner {
        CommandRunner::new(self.config.clone())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir
            .path()
            .join(format!("{}.json", self.config.persistence.key))
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
