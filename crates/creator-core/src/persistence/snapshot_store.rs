//! 快照存储
//!
//! 本地键值存储，按 key 保存整份 JSON 快照。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use creator_shared::error::{CreatorError, Result};
use dashmap::DashMap;
use tracing::debug;

pub trait SnapshotStore: Send + Sync {
    /// 读取快照，不存在时返回 None
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&self, key: &str, data: &str) -> Result<()>;

    /// 删除快照，不存在时视为成功
    fn remove(&self, key: &str) -> Result<()>;
}

/// 文件快照存储
///
/// 每个 key 对应目录下的 `<key>.json`，先写临时文件再重命名。
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CreatorError::InvalidArgument {
                field: "key".to_string(),
                message: format!("快照 key 不合法: {key}"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;

        debug!(path = %path.display(), bytes = data.len(), "快照已写入");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 内存快照存储
///
/// 基于 DashMap，克隆后共享同一份数据，用于测试和不落盘的运行。
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    data: Arc<DashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        self.data.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}
