//! Raft log storage definition

use crate::LogEntry;
use crate::Result;

/// Durable, index addressed raft log.
pub trait LogStore: Send + Sync + 'static {
    /// Lowest stored index, or 0 when the log is empty.
    fn first_index(&self) -> Result<u64>;

    /// Highest stored index, or 0 when the log is empty.
    fn last_index(&self) -> Result<u64>;

    /// Fails with [`crate::StorageError::LogNotFound`] when `index` is absent.
    fn get_log(
        &self,
        index: u64,
    ) -> Result<LogEntry>;

    /// Writes one entry, replacing whatever was stored at the same index.
    fn store_log(
        &self,
        entry: &LogEntry,
    ) -> Result<()>;

    /// Writes entries in order and stops at the first failure.
    ///
    /// Not atomic: entries written before the failing one stay stored.
    fn store_logs(
        &self,
        entries: &[LogEntry],
    ) -> Result<()>;

    /// Deletes `[min, max]` inclusive. Missing indexes are skipped.
    ///
    /// Not atomic: on failure, deletions already performed are kept.
    fn delete_range(
        &self,
        min: u64,
        max: u64,
    ) -> Result<()>;
}
