//! Raw key passthrough handlers.
//!
//! Values are opaque UTF-8 strings stored under `raw/<key>`. They share the
//! ledger with the activity log but never its keys.

use kiosklog_core::Key;
use kiosklog_engine::Database;

use crate::{Error, Output, Result};

/// Reject keys that are empty or contain control characters.
fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::InvalidInput {
            reason: "key must not be empty".into(),
        });
    }
    if key.chars().any(char::is_control) {
        return Err(Error::InvalidInput {
            reason: format!("key {:?} contains control characters", key),
        });
    }
    Ok(())
}

/// Handle ReadKey command.
pub fn read_key(db: &Database, key: String) -> Result<Output> {
    validate_key(&key)?;
    let stored = db
        .ledger()
        .get(&Key::raw(&key))?
        .ok_or_else(|| Error::KeyNotFound { key: key.clone() })?;
    let text = String::from_utf8(stored.value).map_err(|e| Error::Serialization {
        reason: format!("value of {:?} is not UTF-8: {}", key, e),
    })?;
    Ok(Output::Text(text))
}

/// Handle WriteKey command.
pub fn write_key(db: &Database, key: String, value: String) -> Result<Output> {
    validate_key(&key)?;
    db.ledger().put(Key::raw(&key), value.into_bytes())?;
    Ok(Output::Unit)
}
