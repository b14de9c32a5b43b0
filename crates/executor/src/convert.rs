//! Error conversion from internal error types.

use crate::Error;
use kiosklog_security::IdentityError;

/// Convert an engine error to an executor Error.
///
/// Conflicts only escape the engine once its retries are exhausted and
/// surface as `StorageUnavailable`. A corrupt log becomes `Internal`, since
/// retrying cannot repair it.
impl From<kiosklog_core::Error> for Error {
    fn from(err: kiosklog_core::Error) -> Self {
        use kiosklog_core::Error as E;
        match err {
            E::InvalidRecord { reason } => Error::InvalidRecord { reason },
            E::InvalidCoordinate { field, value } => Error::InvalidCoordinate {
                field: field.to_string(),
                value,
            },
            E::InvalidQuery { reason } => Error::InvalidQuery { reason },
            E::InvalidConfig { reason } => Error::InvalidInput { reason },
            E::StorageUnavailable { reason } => Error::StorageUnavailable { reason },
            e @ E::WriteConflict { .. } => Error::StorageUnavailable {
                reason: e.to_string(),
            },
            E::Corruption(reason) => Error::Internal {
                reason: format!("corrupt log: {}", reason),
            },
            E::Io(e) => Error::StorageUnavailable {
                reason: e.to_string(),
            },
            E::Serialization(reason) => Error::Serialization { reason },
        }
    }
}

impl From<IdentityError> for Error {
    fn from(err: IdentityError) -> Self {
        Error::Unauthenticated {
            reason: err.to_string(),
        }
    }
}
