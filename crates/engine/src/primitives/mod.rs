//! Primitives layer for kiosklog
//!
//! Stateless facades over the Database engine:
//! - **ActivityStore**: append-only activity log with guarded appends
//! - **SequenceCounter**: next-id allocation derived from the committed log index
//! - **QueryExecutor**: linear-scan filtering through the predicate engine
//! - **codec**: canonical JSON encoding of records and result lists
//! - **filter**: the per-record predicate evaluation
//!
//! ## Design Principle: Stateless Facades
//!
//! Primitives hold only an `Arc<Database>` and keep no state of their own.
//! Any number of them may share one database; every read goes to the ledger
//! and every write is a guarded commit.

pub mod activity_store;
pub mod codec;
pub mod filter;
pub mod query;
pub mod sequence;

pub use activity_store::{ActivityIter, ActivityStore, Clock};
pub use filter::matches;
pub use query::QueryExecutor;
pub use sequence::{LogIndex, SequenceCounter, SequenceSlot};
