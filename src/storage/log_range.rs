//! Index bounds and ranged deletion synthesized from point access plus full
//! key enumeration.

use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::constants::DELETE_RANGE_SCAN_THRESHOLD;
use crate::EngineError;
use crate::KvEngine;
use crate::LogKey;
use crate::Result;
use crate::StorageError;

/// Lowest and highest stored log index, `None` for an empty log.
///
/// O(keys in engine). Enumeration is not a snapshot, so writes racing with
/// this call may or may not be observed.
pub(crate) fn index_bounds<E: KvEngine + ?Sized>(engine: &E) -> Result<Option<(u64, u64)>> {
    let mut bounds: Option<(u64, u64)> = None;

    for index in log_indexes(engine)? {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(index), hi.max(index)),
            None => (index, index),
        });
    }

    trace!(?bounds, "index_bounds");
    Ok(bounds)
}

/// Every index currently stored under the log namespace, unordered.
pub(crate) fn log_indexes<E: KvEngine + ?Sized>(engine: &E) -> Result<Vec<u64>> {
    let keys = engine.list_keys()?;
    let mut indexes = Vec::new();

    for raw in keys {
        match LogKey::from_raw(&raw) {
            Some(Ok(key)) => indexes.push(key.index()),
            Some(Err(e)) => {
                warn!(?raw, "log namespace key with undecodable index");
                return Err(StorageError::MalformedKey(e).into());
            }
            None => {}
        }
    }

    Ok(indexes)
}

/// Deletes every stored index in `[min, max]` and returns how many were removed.
///
/// Absent indexes are skipped. Any other engine failure aborts and is
/// returned; deletions already performed stay in place.
pub(crate) fn delete_range<E: KvEngine + ?Sized>(
    engine: &E,
    min: u64,
    max: u64,
) -> Result<u64> {
    if min > max {
        trace!(min, max, "empty delete range");
        return Ok(0);
    }

    // Width minus one so that [0, u64::MAX] does not overflow.
    let deleted = if max - min < DELETE_RANGE_SCAN_THRESHOLD {
        let mut deleted = 0;
        for index in min..=max {
            if delete_index(engine, index)? {
                deleted += 1;
            }
        }
        deleted
    } else {
        debug!(min, max, "wide delete range, walking stored log keys");
        let mut deleted = 0;
        let mut targets = stored_indexes_within(engine, min, max)?;
        targets.sort_unstable();
        for index in targets {
            if delete_index(engine, index)? {
                deleted += 1;
            }
        }
        deleted
    };

    debug!(min, max, deleted, "delete_range done");
    Ok(deleted)
}

/// Stored indexes inside `[min, max]`. Log keys whose suffix is not a valid
/// index can never fall inside a range, so they are skipped instead of failing
/// the scan.
fn stored_indexes_within<E: KvEngine + ?Sized>(
    engine: &E,
    min: u64,
    max: u64,
) -> Result<Vec<u64>> {
    let mut indexes = Vec::new();

    for raw in engine.list_keys()? {
        match LogKey::from_raw(&raw) {
            Some(Ok(key)) if (min..=max).contains(&key.index()) => indexes.push(key.index()),
            Some(Err(e)) => warn!(?raw, ?e, "skipping log namespace key with undecodable index"),
            _ => {}
        }
    }

    Ok(indexes)
}

fn delete_index<E: KvEngine + ?Sized>(
    engine: &E,
    index: u64,
) -> Result<bool> {
    let key = LogKey::new(index).to_engine_key();
    match engine.delete(key.as_bytes()) {
        Ok(()) => Ok(true),
        Err(EngineError::KeyNotFound) => {
            trace!(index, "already absent");
            Ok(false)
        }
        Err(e) => {
            warn!(index, ?e, "delete_range aborted");
            Err(e.into())
        }
    }
}
