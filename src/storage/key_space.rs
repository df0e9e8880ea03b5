//! Key space partitioning for the shared flat engine namespace.
//!
//! Raft log entries and stable store values live side by side in one engine.
//! Every engine key starts with a one byte [`Namespace`] tag:
//!
//! ```text
//! log entry:    | 0x00 | index (u64 BE) |
//! stable value: | 0x01 | caller key ... |
//! ```
//!
//! [`LogKey`] and [`MetaKey`] are the only ways to build an [`EngineKey`], so
//! a metadata key can never be passed where a log key is expected.

use crate::constants::INDEX_KEY_LEN;
use crate::constants::LOG_NAMESPACE_TAG;
use crate::constants::META_NAMESPACE_TAG;
use crate::constants::NAMESPACE_PREFIX_LEN;
use crate::convert::safe_kv;
use crate::convert::safe_vk;
use crate::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Raft log entries addressed by index
    Log,
    /// Stable store values addressed by caller key
    Meta,
}

impl Namespace {
    #[inline]
    pub const fn tag(self) -> u8 {
        match self {
            Namespace::Log => LOG_NAMESPACE_TAG,
            Namespace::Meta => META_NAMESPACE_TAG,
        }
    }

    #[inline]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            LOG_NAMESPACE_TAG => Some(Namespace::Log),
            META_NAMESPACE_TAG => Some(Namespace::Meta),
            _ => None,
        }
    }

    /// Namespace a raw engine key belongs to, if any.
    #[inline]
    pub fn of(raw_key: &[u8]) -> Option<Self> {
        raw_key.first().copied().and_then(Self::from_tag)
    }
}

/// Physical key handed to the underlying engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EngineKey(Vec<u8>);

impl EngineKey {
    fn compose(
        namespace: Namespace,
        suffix: &[u8],
    ) -> Self {
        let mut buf = Vec::with_capacity(NAMESPACE_PREFIX_LEN + suffix.len());
        buf.push(namespace.tag());
        buf.extend_from_slice(suffix);
        EngineKey(buf)
    }

    pub fn namespace(&self) -> Option<Namespace> {
        Namespace::of(&self.0)
    }

    /// Logical key with the namespace prefix stripped.
    pub fn suffix(&self) -> &[u8] {
        &self.0[NAMESPACE_PREFIX_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for EngineKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Log namespace key for a single raft index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogKey(u64);

impl LogKey {
    #[inline]
    pub const fn new(index: u64) -> Self {
        LogKey(index)
    }

    #[inline]
    pub const fn index(&self) -> u64 {
        self.0
    }

    pub fn to_engine_key(&self) -> EngineKey {
        EngineKey::compose(Namespace::Log, &safe_kv(self.0))
    }

    /// Decodes a raw engine key.
    ///
    /// Returns `None` for keys outside the log namespace and an error for log
    /// namespace keys whose suffix is not exactly [`INDEX_KEY_LEN`] bytes.
    pub fn from_raw(raw_key: &[u8]) -> Option<std::result::Result<Self, ConvertError>> {
        match Namespace::of(raw_key) {
            Some(Namespace::Log) => Some(safe_vk(&raw_key[NAMESPACE_PREFIX_LEN..]).map(LogKey)),
            _ => None,
        }
    }

    pub const fn encoded_len() -> usize {
        NAMESPACE_PREFIX_LEN + INDEX_KEY_LEN
    }
}

impl From<u64> for LogKey {
    fn from(index: u64) -> Self {
        LogKey(index)
    }
}

/// Stable store key chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetaKey<'a>(&'a [u8]);

impl<'a> MetaKey<'a> {
    #[inline]
    pub const fn new(key: &'a [u8]) -> Self {
        MetaKey(key)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    pub fn to_engine_key(&self) -> EngineKey {
        EngineKey::compose(Namespace::Meta, self.0)
    }
}
