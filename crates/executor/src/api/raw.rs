//! Raw key operations.

use super::KioskLog;
use crate::{Command, Error, Output, Result};

impl KioskLog {
    /// Read a raw key.
    ///
    /// Returns `KeyNotFound` if the key was never written.
    pub fn read_key(&self, key: &str) -> Result<String> {
        match self.executor.execute(Command::ReadKey {
            key: key.to_string(),
        })? {
            Output::Text(value) => Ok(value),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ReadKey".into(),
            }),
        }
    }

    /// Write a raw key, replacing any previous value.
    pub fn write_key(&self, key: &str, value: impl Into<String>) -> Result<()> {
        match self.executor.execute(Command::WriteKey {
            key: key.to_string(),
            value: value.into(),
        })? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for WriteKey".into(),
            }),
        }
    }
}
