//! Core trait definitions
//!
//! This module defines the [`Ledger`] trait, the durable key-value store the
//! activity log is persisted through, together with [`WriteBatch`], the unit
//! of atomic, version-guarded commit.

use crate::error::Result;
use crate::types::{Key, Version, VersionedBytes};

/// Atomic set of writes guarded by version preconditions
///
/// A batch commits only if every guarded key still has the version the
/// writer observed. `Version::ZERO` guards that a key is still absent.
/// Either every write is applied or none is.
///
/// # Example
///
/// ```ignore
/// let mut batch = WriteBatch::new();
/// batch.guard(Key::activity_index(), observed_version);
/// batch.put(Key::activity(id), record_bytes);
/// batch.put(Key::activity_index(), index_bytes);
/// ledger.commit(batch)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    guards: Vec<(Key, Version)>,
    writes: Vec<(Key, Vec<u8>)>,
}

impl WriteBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `key` to be at `expected` version when the batch commits
    pub fn guard(&mut self, key: Key, expected: Version) -> &mut Self {
        self.guards.push((key, expected));
        self
    }

    /// Write `value` under `key` when the batch commits
    pub fn put(&mut self, key: Key, value: Vec<u8>) -> &mut Self {
        self.writes.push((key, value));
        self
    }

    /// Version preconditions
    pub fn guards(&self) -> &[(Key, Version)] {
        &self.guards
    }

    /// Pending writes, in insertion order
    pub fn writes(&self) -> &[(Key, Vec<u8>)] {
        &self.writes
    }

    /// Split into guards and writes
    pub fn into_parts(self) -> (Vec<(Key, Version)>, Vec<(Key, Vec<u8>)>) {
        (self.guards, self.writes)
    }

    /// True if the batch writes nothing
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Durable key-value ledger
///
/// Implementations must be safe to share across threads. Every successful
/// write advances a ledger-wide commit version; each key remembers the
/// version of its last write.
///
/// Failures to reach the underlying medium are reported as
/// `Error::StorageUnavailable`; guard mismatches as `Error::WriteConflict`.
pub trait Ledger: Send + Sync {
    /// Read the current value of `key`
    fn get(&self, key: &Key) -> Result<Option<VersionedBytes>>;

    /// Write `value` under `key` unconditionally
    fn put(&self, key: Key, value: Vec<u8>) -> Result<Version>;

    /// Atomically check every guard and apply every write
    fn commit(&self, batch: WriteBatch) -> Result<Version>;

    /// Version of the most recent successful write
    fn current_version(&self) -> Version;
}
