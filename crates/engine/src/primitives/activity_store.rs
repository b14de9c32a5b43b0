//! ActivityStore: append-only activity log
//!
//! ## Design Principles
//!
//! 1. **Guarded appends**: every append commits the record and the advanced
//!    log index in one batch guarded by the index version it read. A record
//!    can only land at an id nobody else has claimed.
//!
//! 2. **Append-only**: records are never updated or deleted.
//!
//! 3. **Prefix reads**: readers take the committed count and read records
//!    `0..count`. Records below the count are immutable, so a reader always
//!    sees a consistent prefix even while appends are in flight.
//!
//! ## Key Design
//!
//! - Record key: `activity/<id, 20-digit zero-padded>`
//! - Index key: `activity/__index__`

use crate::database::Database;
use crate::primitives::codec::{decode_activity, encode_activity};
use crate::primitives::sequence::SequenceCounter;
use kiosklog_core::{now_millis, Activity, ActivityDraft, Error, Key, Result, WriteBatch};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Source of creation timestamps, in milliseconds since the Unix epoch
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Append-only activity log over a database
///
/// Cheap to clone; clones share the database.
#[derive(Clone)]
pub struct ActivityStore {
    db: Arc<Database>,
    sequence: SequenceCounter,
    clock: Clock,
}

impl ActivityStore {
    /// Create a store over `db`, stamping records with the wall clock
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_clock(db, Arc::new(now_millis))
    }

    /// Create a store with an explicit timestamp source
    pub fn with_clock(db: Arc<Database>, clock: Clock) -> Self {
        let sequence = SequenceCounter::new(Arc::clone(&db));
        Self { db, sequence, clock }
    }

    /// The underlying database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Validate `draft`, assign it the next id and a fresh timestamp, and
    /// persist it.
    ///
    /// The id and timestamp are recomputed on every retry, so a returned
    /// activity always carries the id its batch actually committed at.
    ///
    /// # Errors
    /// - `InvalidRecord` / `InvalidCoordinate` if the draft is rejected
    /// - `StorageUnavailable` if the ledger fails or retries run out
    /// - `Corruption` if the log index does not decode
    ///
    /// Nothing is persisted on any error.
    pub fn append(&self, draft: ActivityDraft) -> Result<Activity> {
        let validated = draft.validate()?;

        let activity = self.db.commit_guarded(|_| {
            let slot = self.sequence.next()?;
            let activity = validated.clone().into_activity(slot.id, (self.clock)());

            let mut batch = WriteBatch::new();
            batch.put(Key::activity(slot.id), encode_activity(&activity)?);
            slot.claim(&mut batch)?;
            Ok((batch, activity))
        })?;

        debug!(
            target: "kiosklog::activity",
            id = activity.id,
            activity_type = %activity.activity_type,
            kiosk = %activity.kiosk.id,
            "Activity appended"
        );
        Ok(activity)
    }

    /// Every committed activity in id order
    pub fn all(&self) -> Result<Vec<Activity>> {
        self.iter()?.collect()
    }

    /// Lazily read the committed prefix of the log.
    ///
    /// The prefix length is fixed when the iterator is created; appends that
    /// commit afterwards are not yielded.
    pub fn iter(&self) -> Result<ActivityIter> {
        Ok(ActivityIter {
            db: Arc::clone(&self.db),
            next: 0,
            end: self.sequence.committed()?,
        })
    }

    /// Activity with the given id, if it has been committed
    pub fn get(&self, id: u64) -> Result<Option<Activity>> {
        self.db
            .ledger()
            .get(&Key::activity(id))?
            .map(|stored| decode_activity(&stored.value))
            .transpose()
    }

    /// Number of committed activities
    pub fn len(&self) -> Result<u64> {
        self.sequence.committed()
    }

    /// True if nothing has been appended
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl fmt::Debug for ActivityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityStore").field("db", &self.db).finish()
    }
}

/// Iterator over a fixed prefix of the log
pub struct ActivityIter {
    db: Arc<Database>,
    next: u64,
    end: u64,
}

impl Iterator for ActivityIter {
    type Item = Result<Activity>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let id = self.next;
        self.next += 1;

        let item = match self.db.ledger().get(&Key::activity(id)) {
            Ok(Some(stored)) => decode_activity(&stored.value),
            Ok(None) => Err(Error::Corruption(format!(
                "activity {} is below the committed count but missing",
                id
            ))),
            Err(e) => Err(e),
        };
        if item.is_err() {
            // A broken prefix cannot be resumed past
            self.next = self.end;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}
