//! Underlying key/value engine contract consumed by the raft store.

#[cfg(test)]
use mockall::automock;

use crate::EngineError;

/// Durable flat key/value engine with point access and full key enumeration.
///
/// Implementations own concurrency for individual calls. Nothing here is
/// atomic across calls, and `list_keys` is not required to be a snapshot.
#[cfg_attr(test, automock)]
pub trait KvEngine: Send + Sync + 'static {
    /// Inserts or overwrites `key`.
    fn put(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), EngineError>;

    fn get(
        &self,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, EngineError>;

    /// Removes `key`, failing with [`EngineError::KeyNotFound`] if it is absent.
    fn delete(
        &self,
        key: &[u8],
    ) -> Result<(), EngineError>;

    /// Every key currently stored, across all namespaces.
    fn list_keys(&self) -> Result<Vec<Vec<u8>>, EngineError>;

    /// Optional: Flush pending writes
    fn flush(&self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Releases the engine. Later calls fail with [`EngineError::Closed`].
    fn close(&self) -> Result<(), EngineError>;
}
