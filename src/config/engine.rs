use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Sled engine tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Database directory
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Page cache size in bytes
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// Background flush interval, `None` disables it
    #[serde(default = "default_flush_every_ms")]
    pub flush_every_ms: Option<u64>,

    #[serde(default = "default_use_compression")]
    pub use_compression: bool,

    /// zstd level (1-22)
    #[serde(default = "default_compression_factor")]
    pub compression_factor: i32,

    /// Segment size in bytes, a power of two
    #[serde(default = "default_segment_size")]
    pub segment_size: usize,

    /// Flush after every write through the store
    #[serde(default)]
    pub sync_writes: bool,

    /// Remove the database directory when the engine is dropped
    #[serde(default)]
    pub temporary: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            cache_capacity: default_cache_capacity(),
            flush_every_ms: default_flush_every_ms(),
            use_compression: default_use_compression(),
            compression_factor: default_compression_factor(),
            segment_size: default_segment_size(),
            sync_writes: false,
            temporary: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(invalid("db_path cannot be empty"));
        }

        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity must be greater than 0"));
        }

        if !(1..=22).contains(&self.compression_factor) {
            return Err(invalid(format!(
                "compression_factor must be between 1 and 22, got {}",
                self.compression_factor
            )));
        }

        if !self.segment_size.is_power_of_two() || !(256..=1 << 24).contains(&self.segment_size) {
            return Err(invalid(format!(
                "segment_size must be a power of two between 256 and 16MB, got {}",
                self.segment_size
            )));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::Config(ConfigError::Message(msg.into()))
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./db/raft_kv")
}
fn default_cache_capacity() -> u64 {
    64 * 1024 * 1024 //64MB
}
fn default_flush_every_ms() -> Option<u64> {
    Some(500)
}
fn default_use_compression() -> bool {
    true
}
fn default_compression_factor() -> i32 {
    1
}
fn default_segment_size() -> usize {
    8 * 1024 * 1024 //8MB
}
