mod adaptors;
mod key_space;
mod kv_engine;
mod log_entry;
pub(crate) mod log_range;
mod log_store;
mod raft_kv_store;
mod stable_store;

#[doc(hidden)]
pub use adaptors::*;
pub use key_space::*;
pub use kv_engine::*;
pub use log_entry::*;
pub use log_store::*;
pub use raft_kv_store::*;
pub use stable_store::*;

#[cfg(test)]
mod log_range_test;
