//! Storage layer for kiosklog
//!
//! This crate implements the ledgers the activity log is persisted through:
//! - MemoryLedger: FxHashMap behind a RwLock, for ephemeral databases
//! - WalLedger: MemoryLedger plus an append-only, checksummed log file
//! - DurabilityMode: how hard each WAL append pushes towards the disk
//!
//! Both implement `kiosklog_core::Ledger`: reads return the value with the
//! version of its last write, and `commit` applies a guarded `WriteBatch`
//! atomically under a single commit version.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod stored_value;
pub mod wal;

pub use memory::MemoryLedger;
pub use stored_value::StoredValue;
pub use wal::{DurabilityMode, WalLedger, WalRecord};
