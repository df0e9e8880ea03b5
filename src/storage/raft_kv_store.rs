//! Raft log store and stable store sharing one flat key/value engine.
//!
//! Log entries live under [`Namespace::Log`](crate::Namespace) keyed by the
//! big-endian index, stable values under [`Namespace::Meta`](crate::Namespace)
//! keyed by the caller's bytes. The store keeps no state of its own besides
//! the engine handle: first/last index are recomputed from a full key
//! enumeration on every call, and no operation is atomic across engine calls.

use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::trace;
use tracing::warn;

use crate::convert::safe_kv;
use crate::convert::safe_vk;
use crate::storage::log_range;
use crate::KvEngine;
use crate::LogEntry;
use crate::LogKey;
use crate::LogStore;
use crate::MetaKey;
use crate::Result;
use crate::SledKvEngine;
use crate::StableStore;
use crate::StorageError;
use crate::StoreConfig;

pub struct RaftKvStore<E: KvEngine> {
    engine: E,

    /// Flush the engine after each write call
    sync_writes: bool,
}

impl RaftKvStore<SledKvEngine> {
    /// Opens a sled backed store as described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let engine = SledKvEngine::open(&config.engine)?;
        info!("raft kv store opened at {:?}", config.engine.db_path);
        Ok(Self::new(engine).with_sync_writes(config.engine.sync_writes))
    }
}

impl<E: KvEngine> RaftKvStore<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            sync_writes: false,
        }
    }

    pub fn with_sync_writes(
        mut self,
        sync_writes: bool,
    ) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Forces buffered engine writes to disk.
    #[instrument(skip(self))]
    pub fn flush(&self) -> Result<()> {
        self.engine.flush()?;
        Ok(())
    }

    /// Releases the engine. Every later call fails with
    /// [`EngineError::Closed`](crate::EngineError::Closed).
    #[instrument(skip(self))]
    pub fn close(&self) -> Result<()> {
        self.engine.close()?;
        info!("raft kv store closed");
        Ok(())
    }

    fn after_write(&self) -> Result<()> {
        if self.sync_writes {
            self.flush()?;
        }
        Ok(())
    }

    fn put_entry(
        &self,
        entry: &LogEntry,
    ) -> Result<()> {
        let key = LogKey::new(entry.index).to_engine_key();
        let value = entry.encode()?;
        self.engine.put(key.as_bytes(), &value)?;
        Ok(())
    }
}

impl<E: KvEngine> LogStore for RaftKvStore<E> {
    #[instrument(skip(self))]
    fn first_index(&self) -> Result<u64> {
        Ok(log_range::index_bounds(&self.engine)?.map_or(0, |(first, _)| first))
    }

    #[instrument(skip(self))]
    fn last_index(&self) -> Result<u64> {
        Ok(log_range::index_bounds(&self.engine)?.map_or(0, |(_, last)| last))
    }

    #[instrument(skip(self))]
    fn get_log(
        &self,
        index: u64,
    ) -> Result<LogEntry> {
        let key = LogKey::new(index).to_engine_key();
        match self.engine.get(key.as_bytes())? {
            Some(bytes) => LogEntry::decode_at(index, &bytes),
            None => {
                trace!(index, "log not found");
                Err(StorageError::LogNotFound(index).into())
            }
        }
    }

    #[instrument(skip(self, entry), fields(index = entry.index, term = entry.term))]
    fn store_log(
        &self,
        entry: &LogEntry,
    ) -> Result<()> {
        self.put_entry(entry)?;
        self.after_write()
    }

    #[instrument(skip(self, entries), fields(len = entries.len()))]
    fn store_logs(
        &self,
        entries: &[LogEntry],
    ) -> Result<()> {
        for (stored, entry) in entries.iter().enumerate() {
            if let Err(e) = self.put_entry(entry) {
                warn!(
                    index = entry.index,
                    stored, "store_logs stopped, earlier entries of the batch remain stored"
                );
                return Err(e);
            }
        }
        debug!("store_logs len = {}", entries.len());
        self.after_write()
    }

    #[instrument(skip(self))]
    fn delete_range(
        &self,
        min: u64,
        max: u64,
    ) -> Result<()> {
        log_range::delete_range(&self.engine, min, max)?;
        self.after_write()
    }
}

impl<E: KvEngine> StableStore for RaftKvStore<E> {
    #[instrument(skip(self, key, value), fields(key_len = key.len(), value_len = value.len()))]
    fn set(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<()> {
        let key = MetaKey::new(key).to_engine_key();
        self.engine.put(key.as_bytes(), value)?;
        self.after_write()
    }

    #[instrument(skip(self, key), fields(key_len = key.len()))]
    fn get(
        &self,
        key: &[u8],
    ) -> Result<Vec<u8>> {
        let engine_key = MetaKey::new(key).to_engine_key();
        self.engine
            .get(engine_key.as_bytes())?
            .ok_or_else(|| StorageError::NotFound.into())
    }

    #[instrument(skip(self, key), fields(key_len = key.len()))]
    fn set_u64(
        &self,
        key: &[u8],
        value: u64,
    ) -> Result<()> {
        self.set(key, &safe_kv(value))
    }

    #[instrument(skip(self, key), fields(key_len = key.len()))]
    fn get_u64(
        &self,
        key: &[u8],
    ) -> Result<u64> {
        let bytes = self.get(key)?;
        safe_vk(&bytes).map_err(|e| StorageError::MalformedValue(e).into())
    }
}

impl<E: KvEngine + std::fmt::Debug> std::fmt::Debug for RaftKvStore<E> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("RaftKvStore")
            .field("engine", &self.engine)
            .field("sync_writes", &self.sync_writes)
            .finish()
    }
}
