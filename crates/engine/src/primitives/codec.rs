//! Record codec
//!
//! Activities are stored as JSON using the kiosk ledger field names
//! (`activityId`, `actorType`, `kioskId`, ...). Responses serialize
//! `Activity` through the same serde mapping, so stored and returned
//! records share one shape.

use kiosklog_core::{Activity, Error, Result};

/// Encode one activity for storage
pub fn encode_activity(activity: &Activity) -> Result<Vec<u8>> {
    serde_json::to_vec(activity).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a stored activity.
///
/// # Errors
/// Returns `Corruption` if the bytes are not a valid record.
pub fn decode_activity(bytes: &[u8]) -> Result<Activity> {
    serde_json::from_slice(bytes).map_err(|e| Error::Corruption(format!("undecodable activity: {}", e)))
}
