//! 持久化
//!
//! 快照格式与快照存储后端。

pub mod snapshot;
pub mod snapshot_store;

pub use snapshot::{AppSnapshot, SnapshotPatch, overlay};
pub use snapshot_store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
