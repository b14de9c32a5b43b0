//! In-memory ledger
//!
//! `MemoryLedger` keeps every key in one `FxHashMap` behind a
//! `parking_lot::RwLock`. Reads share the lock; commits take it
//! exclusively, which makes guard checking and write application a single
//! atomic step.
//!
//! # Version Handling
//!
//! The ledger-wide version is bumped once per successful commit, and every
//! key written by that commit is stamped with the new version. A batch of
//! N writes therefore consumes one version, not N.

use kiosklog_core::{Error, Key, Ledger, Result, Version, VersionedBytes, WriteBatch};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::stored_value::StoredValue;

#[derive(Debug, Default)]
struct LedgerState {
    entries: FxHashMap<Key, StoredValue>,
    version: Version,
}

impl LedgerState {
    fn version_of(&self, key: &Key) -> Version {
        self.entries
            .get(key)
            .map(StoredValue::version)
            .unwrap_or(Version::ZERO)
    }

    fn check_guards(&self, guards: &[(Key, Version)]) -> Result<()> {
        for (key, expected) in guards {
            let actual = self.version_of(key);
            if actual != *expected {
                return Err(Error::WriteConflict {
                    key: key.clone(),
                    expected: *expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn apply(&mut self, writes: Vec<(Key, Vec<u8>)>, version: Version) {
        for (key, value) in writes {
            self.entries.insert(key, StoredValue::new(value, version));
        }
        self.version = version;
    }
}

/// Thread-safe in-memory ledger
///
/// Used directly for ephemeral databases and as the state behind
/// [`WalLedger`](crate::WalLedger).
#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<LedgerState>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Commit `batch`, running `persist` after the guards pass and before
    /// the writes become visible.
    ///
    /// `persist` receives the version the commit will get. If it fails the
    /// batch is dropped and the error returned unchanged.
    pub(crate) fn commit_with<F>(&self, batch: WriteBatch, persist: F) -> Result<Version>
    where
        F: FnOnce(Version, &[(Key, Vec<u8>)]) -> Result<()>,
    {
        let (guards, writes) = batch.into_parts();
        let mut state = self.state.write();
        state.check_guards(&guards)?;

        let version = state.version.next();
        persist(version, &writes)?;
        state.apply(writes, version);
        Ok(version)
    }

    /// Apply writes recovered from durable storage at a known version.
    ///
    /// Replay never goes backwards: a version at or below the current one
    /// is ignored.
    pub(crate) fn replay(&self, version: Version, writes: Vec<(Key, Vec<u8>)>) -> bool {
        let mut state = self.state.write();
        if version <= state.version {
            return false;
        }
        state.apply(writes, version);
        true
    }
}

impl Ledger for MemoryLedger {
    fn get(&self, key: &Key) -> Result<Option<VersionedBytes>> {
        Ok(self.state.read().entries.get(key).map(StoredValue::to_versioned))
    }

    fn put(&self, key: Key, value: Vec<u8>) -> Result<Version> {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        self.commit(batch)
    }

    fn commit(&self, batch: WriteBatch) -> Result<Version> {
        self.commit_with(batch, |_, _| Ok(()))
    }

    fn current_version(&self) -> Version {
        self.state.read().version
    }
}
