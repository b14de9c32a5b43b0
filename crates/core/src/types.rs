//! Core types for the activity log
//!
//! This module defines the foundational storage types:
//! - Key: Ledger key with a namespace prefix
//! - Version: Commit version assigned by the ledger to every write
//! - VersionedBytes: A stored value together with its version

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix for activity records and their index
const ACTIVITY_PREFIX: &str = "activity/";
/// Namespace prefix for the raw key passthrough
const RAW_PREFIX: &str = "raw/";
/// Suffix of the log index key inside the activity namespace
const INDEX_SUFFIX: &str = "__index__";

/// Ledger key
///
/// Keys are plain strings partitioned into namespaces by prefix:
///
/// - `activity/__index__` holds the log index (committed record count)
/// - `activity/<id>` holds one encoded activity; the id is zero-padded to
///   20 digits so lexicographic key order equals log order
/// - `raw/<user key>` holds values written through the raw passthrough
///
/// Raw keys can never collide with activity keys, so a passthrough write
/// cannot corrupt the log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(String);

impl Key {
    /// Key of the activity with the given id
    pub fn activity(id: u64) -> Self {
        Self(format!("{}{:020}", ACTIVITY_PREFIX, id))
    }

    /// Key of the log index
    pub fn activity_index() -> Self {
        Self(format!("{}{}", ACTIVITY_PREFIX, INDEX_SUFFIX))
    }

    /// Key in the raw passthrough namespace
    pub fn raw(user_key: &str) -> Self {
        Self(format!("{}{}", RAW_PREFIX, user_key))
    }

    /// The full key string, including the namespace prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Activity id encoded in this key, if it is an activity record key
    pub fn activity_id(&self) -> Option<u64> {
        self.0.strip_prefix(ACTIVITY_PREFIX)?.parse().ok()
    }

    /// User portion of a raw passthrough key
    pub fn raw_user_key(&self) -> Option<&str> {
        self.0.strip_prefix(RAW_PREFIX)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Commit version assigned by the ledger
///
/// Versions are ledger-global and strictly increasing: every successful
/// write gets a version larger than every earlier one. `Version::ZERO`
/// never belongs to a stored value, so a guard expecting `ZERO` means
/// "the key must not exist yet".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Version(pub u64);

impl Version {
    /// Version of an absent key
    pub const ZERO: Version = Version(0);

    /// The version following this one
    pub fn next(self) -> Version {
        Version(self.0 + 1)
    }

    /// Raw version number
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored value and the version of the write that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedBytes {
    /// Stored bytes
    pub value: Vec<u8>,
    /// Version of the last write to the key
    pub version: Version,
}
