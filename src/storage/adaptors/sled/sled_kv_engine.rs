use std::path::Path;

use parking_lot::RwLock;
use sled::Db;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::instrument;
use tracing::trace;
use tracing::warn;

use crate::EngineConfig;
use crate::EngineError;
use crate::KvEngine;

/// [`KvEngine`] over a single sled database.
///
/// The handle is dropped on `close`, releasing sled's directory lock. Every
/// later call fails with [`EngineError::Closed`].
pub struct SledKvEngine {
    db: RwLock<Option<Db>>,
}

impl KvEngine for SledKvEngine {
    fn put(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), EngineError> {
        self.with_db(|db| {
            db.insert(key, value)?;
            Ok(())
        })
    }

    fn get(
        &self,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, EngineError> {
        self.with_db(|db| Ok(db.get(key)?.map(|ivec| ivec.to_vec())))
    }

    fn delete(
        &self,
        key: &[u8],
    ) -> Result<(), EngineError> {
        self.with_db(|db| match db.remove(key)? {
            Some(_) => Ok(()),
            None => Err(EngineError::KeyNotFound),
        })
    }

    #[instrument(skip(self))]
    fn list_keys(&self) -> Result<Vec<Vec<u8>>, EngineError> {
        self.with_db(|db| {
            let mut keys = Vec::with_capacity(db.len());
            for key in db.iter().keys() {
                keys.push(key?.to_vec());
            }
            trace!("list_keys len = {}", keys.len());
            Ok(keys)
        })
    }

    #[instrument(skip(self))]
    fn flush(&self) -> Result<(), EngineError> {
        self.with_db(|db| {
            let bytes = db.flush()?;
            trace!("SledKvEngine flushed {} bytes", bytes);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    fn close(&self) -> Result<(), EngineError> {
        let mut guard = self.db.write();
        match guard.take() {
            Some(db) => {
                db.flush()?;
                info!("sled engine closed");
                Ok(())
            }
            None => {
                debug!("sled engine already closed");
                Ok(())
            }
        }
    }
}

impl SledKvEngine {
    /// Opens (or creates) the database described by `config`.
    pub fn open(config: &EngineConfig) -> Result<Self, EngineError> {
        debug!("open sled engine from path: {:?}", &config.db_path);

        let db = sled::Config::default()
            .path(&config.db_path)
            .cache_capacity(config.cache_capacity)
            .flush_every_ms(config.flush_every_ms)
            .use_compression(config.use_compression)
            .compression_factor(config.compression_factor)
            .segment_size(config.segment_size)
            .temporary(config.temporary)
            .open()
            .map_err(|e| {
                warn!(
                    "Try to open DB at this location: {:?} and failed: {:?}",
                    config.db_path, e
                );
                EngineError::from(e)
            })?;

        info!("sled engine opened at {:?}", &config.db_path);
        Ok(Self::from_db(db))
    }

    /// Opens a database at `path` with default tuning.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let config = EngineConfig {
            db_path: path.as_ref().to_path_buf(),
            ..EngineConfig::default()
        };
        Self::open(&config)
    }

    /// Wraps an already opened sled database.
    pub fn from_db(db: Db) -> Self {
        Self {
            db: RwLock::new(Some(db)),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.db.read().is_none()
    }

    fn with_db<T>(
        &self,
        f: impl FnOnce(&Db) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let guard = self.db.read();
        match guard.as_ref() {
            Some(db) => f(db),
            None => Err(EngineError::Closed),
        }
    }
}

impl std::fmt::Debug for SledKvEngine {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let guard = self.db.read();
        f.debug_struct("SledKvEngine")
            .field("closed", &guard.is_none())
            .field("len", &guard.as_ref().map(|db| db.len()))
            .finish()
    }
}

impl Drop for SledKvEngine {
    fn drop(&mut self) {
        if let Some(db) = self.db.get_mut().as_ref() {
            match db.flush() {
                Ok(_) => info!("Successfully flush sled engine"),
                Err(e) => error!(?e, "Failed to flush sled engine"),
            }
        }
    }
}
