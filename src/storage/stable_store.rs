//! Stable storage definition, persistent raft state: e.g. current_term

use crate::Result;

pub trait StableStore: Send + Sync + 'static {
    /// Overwrites `key`.
    fn set(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<()>;

    /// Fails with [`crate::StorageError::NotFound`] when `key` is absent.
    fn get(
        &self,
        key: &[u8],
    ) -> Result<Vec<u8>>;

    fn set_u64(
        &self,
        key: &[u8],
        value: u64,
    ) -> Result<()>;

    fn get_u64(
        &self,
        key: &[u8],
    ) -> Result<u64>;
}
