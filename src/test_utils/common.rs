use std::ops::RangeInclusive;

use tempfile::TempDir;

use crate::LogEntry;
use crate::MemKvEngine;
use crate::RaftKvStore;
use crate::SledKvEngine;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    let _ = env_logger::builder().is_test(true).try_init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
}

/// Entries `index = term = i` with payload `"log{i}"`.
pub fn create_entries(range: RangeInclusive<u64>) -> Vec<LogEntry> {
    range
        .map(|i| LogEntry::command(i, i, format!("log{i}").into_bytes()))
        .collect()
}

pub fn mem_store() -> RaftKvStore<MemKvEngine> {
    RaftKvStore::new(MemKvEngine::new())
}

/// Sled backed store in a fresh temp dir. Keep the `TempDir` alive.
pub fn sled_store() -> (RaftKvStore<SledKvEngine>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let engine = SledKvEngine::open_path(dir.path().join("raft_kv")).unwrap();
    (RaftKvStore::new(engine), dir)
}
