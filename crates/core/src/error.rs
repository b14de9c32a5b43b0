//! Error types for the activity log
//!
//! This module defines all error types used below the executor layer.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! | Variant | Raised by | Persisted state touched? |
//! |---------|-----------|--------------------------|
//! | `InvalidRecord` | draft validation | never |
//! | `InvalidCoordinate` | draft validation | never |
//! | `InvalidQuery` | query parsing | never |
//! | `StorageUnavailable` | ledger read/write | never (commits are atomic) |
//! | `WriteConflict` | guarded ledger commit | never |
//! | `Corruption` | record decoding | n/a (read path) |
//! | `InvalidConfig` | config file / open options | never |

use crate::types::{Key, Version};
use std::io;
use thiserror::Error;

/// Result type alias for activity log operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the activity log
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is absent or malformed
    #[error("Invalid record: {reason}")]
    InvalidRecord {
        /// What was wrong with the record
        reason: String,
    },

    /// Latitude or longitude is not a finite decimal number
    #[error("Invalid coordinate: {field} = {value:?}")]
    InvalidCoordinate {
        /// `latitude` or `longitude`
        field: &'static str,
        /// The rejected input
        value: String,
    },

    /// A filter argument could not be parsed
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// What was wrong with the query
        reason: String,
    },

    /// The ledger could not be read or written
    #[error("Storage unavailable: {reason}")]
    StorageUnavailable {
        /// Underlying failure
        reason: String,
    },

    /// A guarded commit found a different version than expected
    #[error("Write conflict on {key}: expected version {expected}, found {actual}")]
    WriteConflict {
        /// Guarded key
        key: Key,
        /// Version the writer read
        expected: Version,
        /// Version present at commit time
        actual: Version,
    },

    /// Stored data does not decode or an indexed record is missing
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// A configuration value could not be read or parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (WAL file, config file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build an `InvalidRecord` error
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Build an `InvalidQuery` error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Error::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Build an `InvalidConfig` error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Build a `StorageUnavailable` error
    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        Error::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// True for a version-guard mismatch; the caller may retry the whole operation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::WriteConflict { .. })
    }

    /// True if resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::WriteConflict { .. } | Error::StorageUnavailable { .. } | Error::Io(_)
        )
    }

    /// True if the caller's input was rejected before touching storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidRecord { .. } | Error::InvalidCoordinate { .. } | Error::InvalidQuery { .. }
        )
    }
}
