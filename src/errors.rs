//! Raft Storage Adapter Error Hierarchy
//!
//! Errors are grouped by the layer that produced them: configuration, the
//! adapter's own key/record contracts, and the underlying key/value engine.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Log store / stable store failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Store configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Metadata key is absent from the stable store
    #[error("not found")]
    NotFound,

    /// No log entry is stored at the requested index
    #[error("log not found at index {0}")]
    LogNotFound(u64),

    /// Log namespace key whose suffix is not a valid index
    #[error("malformed log key")]
    MalformedKey(#[source] ConvertError),

    /// Stable store value that can not be read as a `u64`
    #[error("malformed uint64 value")]
    MalformedValue(#[source] ConvertError),

    /// Log entry bytes could not be decoded
    #[error("corrupt log record at index {index:?}")]
    CorruptRecord {
        index: Option<u64>,
        #[source]
        source: bincode::Error,
    },

    /// Log entry could not be encoded
    #[error("failed to encode log record at index {index}")]
    Serialization {
        index: u64,
        #[source]
        source: bincode::Error,
    },

    /// Failures surfaced verbatim by the underlying engine
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Embedded database errors
    #[error(transparent)]
    Sled(#[from] sled::Error),

    /// Disk I/O failures
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Engine handle has already been closed
    #[error("storage engine is closed")]
    Closed,

    /// Point delete on an absent key
    #[error("key not found")]
    KeyNotFound,
}

/// Error type for value conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Invalid input length error
    ///
    /// This occurs when the input byte slice length doesn't match the required 8 bytes.
    #[error("invalid byte length: expected 8 bytes, received {0} bytes")]
    InvalidLength(usize),
}

impl Error {
    /// Stable store lookup of an absent key
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound))
    }

    /// Log lookup of an absent index
    pub fn is_log_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::LogNotFound(_)))
    }

    /// Call made after the engine was closed
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::Storage(StorageError::Engine(EngineError::Closed)))
    }
}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        Error::Storage(StorageError::Engine(e))
    }
}
