// -
// Key namespaces

/// Engine key tag byte for raft log entries
pub(crate) const LOG_NAMESPACE_TAG: u8 = 0x00;
/// Engine key tag byte for stable store (metadata) entries
pub(crate) const META_NAMESPACE_TAG: u8 = 0x01;

/// Width of the namespace tag prepended to every engine key
pub(crate) const NAMESPACE_PREFIX_LEN: usize = 1;
/// Width of an encoded log index
pub(crate) const INDEX_KEY_LEN: usize = 8;

// -
// Record format

/// Leading byte of every serialized log record
pub(crate) const RECORD_FORMAT_VERSION: u8 = 1;

// -
// Config

pub(crate) const CONFIG_ENV_PREFIX: &str = "KVSTORE";
pub(crate) const CONFIG_ENV_SEPARATOR: &str = "__";

// -
// Range deletion

/// Above this many candidate indexes, `delete_range` walks the stored log
/// keys instead of probing every index of the interval
pub(crate) const DELETE_RANGE_SCAN_THRESHOLD: u64 = 1 << 16;
