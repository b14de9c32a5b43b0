//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Not Found | `KeyNotFound` | Raw key doesn't exist |
/// | Validation | `InvalidRecord`, `InvalidCoordinate`, `InvalidQuery`, `InvalidInput` | Bad input |
/// | Access | `AccessDenied`, `PermissionDenied`, `Unauthenticated` | Caller may not run the command |
/// | System | `StorageUnavailable`, `Serialization`, `Internal` | Infrastructure errors |
///
/// # Example
///
/// ```ignore
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::PermissionDenied { command, role }) => {
///         println!("{} may not run {}", role, command);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Raw key not found
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    // ==================== Validation Errors ====================
    /// Required activity field missing or malformed
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// Latitude or longitude is not a number
    #[error("invalid {field}: {value:?} is not a decimal number")]
    InvalidCoordinate { field: String, value: String },

    /// Malformed filter argument
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Any other rejected input
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    // ==================== Access Errors ====================
    /// Write rejected because the database is read-only
    #[error("access denied: {command} is a write and the database is read-only")]
    AccessDenied { command: String },

    /// Caller's role may not run the command
    #[error("permission denied: role {role} may not run {command}")]
    PermissionDenied { command: String, role: String },

    /// No usable caller identity
    #[error("unauthenticated: {reason}")]
    Unauthenticated { reason: String },

    // ==================== System Errors ====================
    /// Ledger could not be read or written; nothing was persisted
    #[error("storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Internal error (bug, corrupt log or unexpected state)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// True if resubmitting the same command may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::StorageUnavailable { .. })
    }
}
