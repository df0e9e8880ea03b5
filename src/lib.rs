//! Raft log store and stable store over a single flat key/value engine.
//!
//! One engine instance holds both logical stores. Keys are partitioned by a
//! one byte namespace tag (see [`Namespace`]); log entries are keyed by the
//! big-endian index so byte order matches index order.
//!
//! ```no_run
//! use kv_raft_store::{LogEntry, LogStore, RaftKvStore, StableStore, StoreConfig};
//!
//! # fn main() -> kv_raft_store::Result<()> {
//! let store = RaftKvStore::open(&StoreConfig::load(None)?)?;
//! store.store_log(&LogEntry::command(1, 1, b"log1".to_vec()))?;
//! store.set_u64(b"CurrentTerm", 1)?;
//! assert_eq!(store.last_index()?, 1);
//! store.close()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod errors;
mod storage;
pub mod utils;

pub use self::config::*;
pub use errors::*;
pub use storage::*;
pub use utils::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
