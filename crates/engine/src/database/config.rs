//! Database configuration via `kiosklog.toml`
//!
//! A default `kiosklog.toml` is created in the data directory on first open.
//! To change settings, edit the file and restart, or pass `OpenOptions`
//! overrides when opening.

use kiosklog_core::{Error, Result};
use kiosklog_storage::DurabilityMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::retry::RetryConfig;

/// Config file name placed in the database data directory.
pub const CONFIG_FILE_NAME: &str = "kiosklog.toml";

/// How concurrent appends are kept from claiming the same id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendStrategy {
    /// Single-writer critical section around every append
    Serialized,
    /// Compare-and-swap on the log index, retried on conflict
    #[default]
    Optimistic,
}

impl AppendStrategy {
    /// Config file spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            AppendStrategy::Serialized => "serialized",
            AppendStrategy::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for AppendStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppendStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "serialized" => Ok(AppendStrategy::Serialized),
            "optimistic" => Ok(AppendStrategy::Optimistic),
            other => Err(format!(
                "invalid append strategy '{}', expected \"serialized\" or \"optimistic\"",
                other
            )),
        }
    }
}

/// Database configuration loaded from `kiosklog.toml`.
///
/// # Example
///
/// ```toml
/// durability = "standard"
/// append_strategy = "optimistic"
/// append_max_retries = 200
/// retry_base_delay_ms = 1
/// retry_max_delay_ms = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskLogConfig {
    /// Durability mode: `"standard"` or `"always"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
    /// Append strategy: `"optimistic"` or `"serialized"`.
    #[serde(default = "default_append_strategy_str")]
    pub append_strategy: String,
    /// Conflict retries before an append gives up.
    #[serde(default = "default_append_max_retries")]
    pub append_max_retries: usize,
    /// First backoff delay in milliseconds.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Backoff ceiling in milliseconds.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

fn default_durability_str() -> String {
    "standard".to_string()
}

fn default_append_strategy_str() -> String {
    "optimistic".to_string()
}

fn default_append_max_retries() -> usize {
    RetryConfig::default().max_retries
}

fn default_retry_base_delay_ms() -> u64 {
    RetryConfig::default().base_delay_ms
}

fn default_retry_max_delay_ms() -> u64 {
    RetryConfig::default().max_delay_ms
}

impl Default for KioskLogConfig {
    fn default() -> Self {
        Self {
            durability: default_durability_str(),
            append_strategy: default_append_strategy_str(),
            append_max_retries: default_append_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl KioskLogConfig {
    /// Parse the durability string into a `DurabilityMode`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the string is not `"standard"` or `"always"`.
    pub fn durability_mode(&self) -> Result<DurabilityMode> {
        self.durability.parse().map_err(Error::invalid_config)
    }

    /// Parse the append strategy string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the string is not `"optimistic"` or `"serialized"`.
    pub fn append_strategy(&self) -> Result<AppendStrategy> {
        self.append_strategy.parse().map_err(Error::invalid_config)
    }

    /// Backoff policy for conflicting appends
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .with_max_retries(self.append_max_retries)
            .with_base_delay_ms(self.retry_base_delay_ms)
            .with_max_delay_ms(self.retry_max_delay_ms)
    }

    /// Check every enumerated value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on the first unrecognized value.
    pub fn validate(&self) -> Result<()> {
        self.durability_mode()?;
        self.append_strategy()?;
        Ok(())
    }

    /// True if both configs resolve to the same durability mode, append
    /// strategy and retry policy
    pub fn same_settings(&self, other: &KioskLogConfig) -> bool {
        self.durability_mode().ok() == other.durability_mode().ok()
            && self.append_strategy().ok() == other.append_strategy().ok()
            && self.retry_config() == other.retry_config()
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kiosklog configuration
#
# Durability mode: "standard" (default) or "always"
#   "standard" = every commit is written to the log file before it is acknowledged
#   "always"   = every commit is also fsynced
durability = "standard"

# How concurrent appends are ordered: "optimistic" (default) or "serialized"
#   "optimistic" = compare-and-swap on the log index, retried with backoff
#   "serialized" = one append at a time through a process-wide lock
append_strategy = "optimistic"

# Conflict retries before an append fails, and the backoff window in milliseconds
append_max_retries = 200
retry_base_delay_ms = 1
retry_max_delay_ms = 50
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::storage_unavailable(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: KioskLogConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::storage_unavailable(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::storage_unavailable(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
