//! Raft log entry record and its on-engine encoding.
//!
//! ```text
//! | format version (u8) | bincode(LogEntry), fixed-width ints, no trailing bytes |
//! ```

use bincode::Options;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::RECORD_FORMAT_VERSION;
use crate::Result;
use crate::StorageError;

/// Kind of a log entry. Opaque to the store, only round-tripped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Client command to be applied to the state machine
    #[default]
    Command,
    /// Leader no-op appended at the start of a term
    Noop,
    /// Cluster membership change
    Configuration,
    /// Marker used to confirm leadership
    Barrier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub index: u64,
    pub term: u64,
    pub entry_type: EntryType,
    pub payload: Vec<u8>,
}

#[inline]
fn record_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

impl LogEntry {
    pub fn new(
        index: u64,
        term: u64,
        entry_type: EntryType,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            index,
            term,
            entry_type,
            payload: payload.into(),
        }
    }

    #[inline]
    pub fn command(
        index: u64,
        term: u64,
        payload: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(index, term, EntryType::Command, payload)
    }

    #[inline]
    pub fn noop(
        index: u64,
        term: u64,
    ) -> Self {
        Self::new(index, term, EntryType::Noop, Vec::new())
    }

    /// Serializes the entry into an engine value.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let size = record_options()
            .serialized_size(self)
            .map_err(|source| StorageError::Serialization {
                index: self.index,
                source,
            })?;

        let mut buf = Vec::with_capacity(1 + size as usize);
        buf.push(RECORD_FORMAT_VERSION);
        record_options()
            .serialize_into(&mut buf, self)
            .map_err(|source| StorageError::Serialization {
                index: self.index,
                source,
            })?;
        Ok(buf)
    }

    /// Parses an engine value produced by [`LogEntry::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_record(bytes)
            .map_err(|source| StorageError::CorruptRecord { index: None, source }.into())
    }

    /// Same as [`LogEntry::decode`] but tags failures with the index that was read.
    pub(crate) fn decode_at(
        index: u64,
        bytes: &[u8],
    ) -> Result<Self> {
        decode_record(bytes).map_err(|source| {
            StorageError::CorruptRecord {
                index: Some(index),
                source,
            }
            .into()
        })
    }
}

fn decode_record(bytes: &[u8]) -> std::result::Result<LogEntry, bincode::Error> {
    match bytes.split_first() {
        Some((&RECORD_FORMAT_VERSION, body)) => record_options().deserialize(body),
        Some((version, _)) => Err(Box::new(bincode::ErrorKind::Custom(format!(
            "unsupported record format version: {version}"
        )))),
        None => Err(Box::new(bincode::ErrorKind::Custom("empty record".to_string()))),
    }
}
