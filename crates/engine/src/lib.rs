//! Database engine for kiosklog
//!
//! This crate sits between storage and the command layer:
//! - Database: open/cache, config file, ledger selection, guarded commits
//! - ActivityStore: append-only log with id allocation through the log index
//! - QueryExecutor: filter queries over the committed log
//!
//! The engine is the only component that knows how activities map onto
//! ledger keys.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod database;
pub mod primitives;

pub use database::{AppendStrategy, Database, KioskLogConfig, RetryConfig, CONFIG_FILE_NAME, WAL_FILE_NAME};
pub use primitives::codec::{decode_activity, encode_activity};
pub use primitives::{
    matches, ActivityIter, ActivityStore, Clock, LogIndex, QueryExecutor, SequenceCounter,
    SequenceSlot,
};

pub use kiosklog_storage::DurabilityMode;
