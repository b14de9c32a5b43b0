//! Sequence counter
//!
//! Activity ids are never tracked by a separate counter. The next id is the
//! committed log length, stored in the log index (`activity/__index__`)
//! and rewritten in the same batch as every record. Counter and log cannot
//! drift apart because they are one value.
//!
//! A [`SequenceSlot`] is a tentative id: it becomes real only when the batch
//! it was [claimed](SequenceSlot::claim) into commits with its index guard
//! intact.

use crate::database::Database;
use kiosklog_core::{Error, Key, Ledger, Result, Version, WriteBatch};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Persisted log index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogIndex {
    /// Number of committed activities; also the next id
    pub count: u64,
}

impl LogIndex {
    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub(crate) fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::Corruption(format!("undecodable log index: {}", e)))
    }
}

/// A tentatively assigned id and the index version it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSlot {
    /// Id the next record will get if the claim commits
    pub id: u64,
    /// Version of the log index the id was read from (`ZERO` if no index yet)
    pub index_version: Version,
}

impl SequenceSlot {
    /// Add the guards and the index update that turn this slot into a real id.
    ///
    /// The batch fails with `WriteConflict` if another append advanced the
    /// index, or if a record already sits at this id.
    pub fn claim(&self, batch: &mut WriteBatch) -> Result<()> {
        let next = LogIndex { count: self.id + 1 };
        batch
            .guard(Key::activity_index(), self.index_version)
            .guard(Key::activity(self.id), Version::ZERO)
            .put(Key::activity_index(), next.encode()?);
        Ok(())
    }
}

/// Read the committed log index and its version.
fn read_index(ledger: &dyn Ledger) -> Result<(LogIndex, Version)> {
    match ledger.get(&Key::activity_index())? {
        Some(stored) => Ok((LogIndex::decode(&stored.value)?, stored.version)),
        None => Ok((LogIndex::default(), Version::ZERO)),
    }
}

/// Next-id allocator over a database
#[derive(Clone)]
pub struct SequenceCounter {
    db: Arc<Database>,
}

impl SequenceCounter {
    /// Create a counter over `db`
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Slot for the next append: one past the last committed id, 0 on a fresh log.
    ///
    /// Calling `next` twice without committing returns the same id.
    ///
    /// # Errors
    /// `StorageUnavailable` if the index cannot be read, `Corruption` if it
    /// does not decode.
    pub fn next(&self) -> Result<SequenceSlot> {
        let (index, index_version) = read_index(self.db.ledger())?;
        Ok(SequenceSlot {
            id: index.count,
            index_version,
        })
    }

    /// Number of committed activities
    pub fn committed(&self) -> Result<u64> {
        read_index(self.db.ledger()).map(|(index, _)| index.count)
    }
}
