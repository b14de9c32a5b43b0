//! Storage-layer value wrapper
//!
//! The contract type `VersionedBytes` is what callers see; `StoredValue` is
//! what the ledger keeps per key.

use kiosklog_core::{Version, VersionedBytes};

/// A stored value and the version of the write that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    value: Vec<u8>,
    version: Version,
}

impl StoredValue {
    /// Create a new stored value
    pub fn new(value: Vec<u8>, version: Version) -> Self {
        StoredValue { value, version }
    }

    /// Get the stored bytes
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Get the version
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Copy out into the contract type
    pub fn to_versioned(&self) -> VersionedBytes {
        VersionedBytes {
            value: self.value.clone(),
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_versioned_preserves_fields() {
        let sv = StoredValue::new(b"abc".to_vec(), Version(9));
        let vb = sv.to_versioned();
        assert_eq!(vb.value, b"abc");
        assert_eq!(vb.version, Version(9));
        assert_eq!(sv.value(), b"abc");
        assert_eq!(sv.version(), Version(9));
    }
}
