use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::log_range::*;
use crate::test_utils::enable_logger;
use crate::EngineError;
use crate::Error;
use crate::KvEngine;
use crate::LogKey;
use crate::MemKvEngine;
use crate::MetaKey;
use crate::MockKvEngine;
use crate::StorageError;

fn log_key(index: u64) -> Vec<u8> {
    LogKey::new(index).to_engine_key().as_bytes().to_vec()
}

fn meta_key(key: &[u8]) -> Vec<u8> {
    MetaKey::new(key).to_engine_key().as_bytes().to_vec()
}

fn index_of(raw: &[u8]) -> u64 {
    LogKey::from_raw(raw).unwrap().unwrap().index()
}

#[test]
fn test_index_bounds_empty_engine() {
    let engine = MemKvEngine::new();
    assert_eq!(index_bounds(&engine).unwrap(), None);
}

#[test]
fn test_index_bounds_ignores_meta_namespace() {
    let engine = MemKvEngine::new();
    // Meta keys sort after every log key and look like huge indexes if misread.
    engine.put(&meta_key(&[0xff; 8]), b"x").unwrap();
    engine.put(&meta_key(b""), b"y").unwrap();
    assert_eq!(index_bounds(&engine).unwrap(), None);

    engine.put(&log_key(9), b"v").unwrap();
    assert_eq!(index_bounds(&engine).unwrap(), Some((9, 9)));
}

#[test]
fn test_index_bounds_uses_numeric_order() {
    let mut engine = MockKvEngine::new();
    // Deliberately unsorted enumeration.
    engine.expect_list_keys().returning(|| {
        Ok(vec![
            log_key(256),
            meta_key(b"CurrentTerm"),
            log_key(3),
            log_key(1 << 40),
            log_key(255),
        ])
    });

    assert_eq!(index_bounds(&engine).unwrap(), Some((3, 1 << 40)));
}

#[test]
fn test_index_bounds_includes_index_zero() {
    let engine = MemKvEngine::new();
    engine.put(&log_key(0), b"v").unwrap();
    engine.put(&log_key(5), b"v").unwrap();

    assert_eq!(index_bounds(&engine).unwrap(), Some((0, 5)));
}

#[test]
fn test_index_bounds_malformed_log_key() {
    let mut engine = MockKvEngine::new();
    engine
        .expect_list_keys()
        .returning(|| Ok(vec![log_key(1), vec![0x00, 0x01, 0x02]]));

    match index_bounds(&engine) {
        Err(Error::Storage(StorageError::MalformedKey(_))) => {}
        other => panic!("expected MalformedKey, got {other:?}"),
    }
}

#[test]
fn test_index_bounds_propagates_enumeration_failure() {
    let mut engine = MockKvEngine::new();
    engine
        .expect_list_keys()
        .returning(|| Err(EngineError::Io(io::Error::other("disk gone"))));

    match index_bounds(&engine) {
        Err(Error::Storage(StorageError::Engine(EngineError::Io(_)))) => {}
        other => panic!("expected engine error, got {other:?}"),
    }
}

#[test]
fn test_delete_range_skips_gaps() {
    enable_logger();
    let engine = MemKvEngine::new();
    for i in [1, 2, 4, 7] {
        engine.put(&log_key(i), b"v").unwrap();
    }

    assert_eq!(delete_range(&engine, 2, 6).unwrap(), 2);

    let left: Vec<u64> = engine.list_keys().unwrap().iter().map(|k| index_of(k)).collect();
    assert_eq!(left, vec![1, 7]);

    // already absent, still fine
    assert_eq!(delete_range(&engine, 2, 6).unwrap(), 0);
}

#[test]
fn test_delete_range_min_greater_than_max_is_noop() {
    let mut engine = MockKvEngine::new();
    engine.expect_delete().never();
    engine.expect_list_keys().never();

    assert_eq!(delete_range(&engine, 5, 4).unwrap(), 0);
}

#[test]
fn test_delete_range_single_index() {
    let engine = MemKvEngine::new();
    engine.put(&log_key(0), b"v").unwrap();
    engine.put(&log_key(1), b"v").unwrap();

    assert_eq!(delete_range(&engine, 0, 0).unwrap(), 1);
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_delete_range_aborts_on_engine_error_without_rollback() {
    let deleted: Arc<Mutex<BTreeSet<u64>>> = Arc::new(Mutex::new(BTreeSet::new()));
    let seen = deleted.clone();

    let mut engine = MockKvEngine::new();
    engine.expect_delete().times(3).returning(move |key| {
        let index = index_of(key);
        match index {
            3 => Err(EngineError::Io(io::Error::other("write failed"))),
            _ => {
                seen.lock().insert(index);
                Ok(())
            }
        }
    });

    let result = delete_range(&engine, 1, 5);

    assert!(matches!(
        result,
        Err(Error::Storage(StorageError::Engine(EngineError::Io(_))))
    ));
    // 1 and 2 stay deleted, 4 and 5 were never attempted
    assert_eq!(*deleted.lock(), BTreeSet::from([1, 2]));
}

#[test]
fn test_wide_delete_range_walks_stored_keys() {
    let engine = MemKvEngine::new();
    for i in [0, 10, 1 << 20, u64::MAX - 1, u64::MAX] {
        engine.put(&log_key(i), b"v").unwrap();
    }
    engine.put(&meta_key(b"CurrentTerm"), b"t").unwrap();

    assert_eq!(delete_range(&engine, 10, u64::MAX - 1).unwrap(), 3);

    let mut left: Vec<u64> = engine
        .list_keys()
        .unwrap()
        .iter()
        .filter_map(|k| LogKey::from_raw(k).map(|r| r.unwrap().index()))
        .collect();
    left.sort();
    assert_eq!(left, vec![0, u64::MAX]);
    assert_eq!(engine.get(&meta_key(b"CurrentTerm")).unwrap(), Some(b"t".to_vec()));
}

#[test]
fn test_wide_delete_range_skips_malformed_log_key() {
    enable_logger();
    let engine = MemKvEngine::new();
    engine.put(&log_key(5), b"v").unwrap();
    engine.put(&[0x00, 0x01, 0x02], b"junk").unwrap();

    // Narrow and wide ranges agree: the malformed key is outside any range.
    assert_eq!(delete_range(&engine, 0, 10).unwrap(), 1);
    engine.put(&log_key(5), b"v").unwrap();
    assert_eq!(delete_range(&engine, 0, u64::MAX).unwrap(), 1);

    assert_eq!(engine.get(&log_key(5)).unwrap(), None);
    assert_eq!(engine.get(&[0x00, 0x01, 0x02]).unwrap(), Some(b"junk".to_vec()));
    // Bounds still report the bad key.
    assert!(matches!(
        index_bounds(&engine),
        Err(Error::Storage(StorageError::MalformedKey(_)))
    ));
}

#[test]
fn test_full_range_delete_does_not_overflow() {
    let engine = MemKvEngine::new();
    for i in [0, 1, u64::MAX] {
        engine.put(&log_key(i), b"v").unwrap();
    }

    assert_eq!(delete_range(&engine, 0, u64::MAX).unwrap(), 3);
    assert!(engine.is_empty());
}

#[test]
fn test_wide_delete_range_tolerates_concurrent_removal() {
    let mut engine = MockKvEngine::new();
    engine
        .expect_list_keys()
        .returning(|| Ok(vec![log_key(5), log_key(1 << 30)]));
    // 5 vanished between enumeration and delete
    engine.expect_delete().times(2).returning(|key| match index_of(key) {
        5 => Err(EngineError::KeyNotFound),
        _ => Ok(()),
    });

    assert_eq!(delete_range(&engine, 0, u64::MAX).unwrap(), 1);
}
