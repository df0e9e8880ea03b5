use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;
use tracing::trace;

use crate::EngineError;
use crate::KvEngine;

/// In-memory [`KvEngine`]. Nothing survives the process.
#[derive(Debug)]
pub struct MemKvEngine {
    data: RwLock<Option<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl KvEngine for MemKvEngine {
    fn put(
        &self,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), EngineError> {
        let mut guard = self.data.write();
        let data = guard.as_mut().ok_or(EngineError::Closed)?;
        data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(
        &self,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, EngineError> {
        let guard = self.data.read();
        let data = guard.as_ref().ok_or(EngineError::Closed)?;
        Ok(data.get(key).cloned())
    }

    fn delete(
        &self,
        key: &[u8],
    ) -> Result<(), EngineError> {
        let mut guard = self.data.write();
        let data = guard.as_mut().ok_or(EngineError::Closed)?;
        data.remove(key).map(|_| ()).ok_or(EngineError::KeyNotFound)
    }

    fn list_keys(&self) -> Result<Vec<Vec<u8>>, EngineError> {
        let guard = self.data.read();
        let data = guard.as_ref().ok_or(EngineError::Closed)?;
        trace!("list_keys len = {}", data.len());
        Ok(data.keys().cloned().collect())
    }

    fn flush(&self) -> Result<(), EngineError> {
        trace!("MemKvEngine flush (no-op)");
        match self.data.read().as_ref() {
            Some(_) => Ok(()),
            None => Err(EngineError::Closed),
        }
    }

    fn close(&self) -> Result<(), EngineError> {
        if self.data.write().take().is_some() {
            debug!("MemKvEngine closed");
        }
        Ok(())
    }
}

impl MemKvEngine {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Some(BTreeMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.data.read().as_ref().map_or(0, |d| d.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemKvEngine {
    fn default() -> Self {
        Self::new()
    }
}
