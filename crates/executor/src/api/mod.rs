//! High-level typed wrapper for the Executor.
//!
//! The [`KioskLog`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use kiosklog_executor::{CreateActivityRequest, KioskLog, ViewActivitiesRequest};
//!
//! let log = KioskLog::open("/var/data/kiosks")?;
//!
//! let activity = log.create_activity(CreateActivityRequest {
//!     actor_type: "vendor".into(),
//!     name: "Ada".into(),
//!     activity_type: "restock".into(),
//!     kiosk_id: "K-1".into(),
//!     latitude: "52.52".into(),
//!     longitude: "13.405".into(),
//!     ..Default::default()
//! })?;
//!
//! let at_k1 = log.view_activities(&ViewActivitiesRequest {
//!     kiosk_ids: vec!["K-1".into()],
//!     ..Default::default()
//! })?;
//! ```

mod activity;
mod raw;

use std::path::Path;
use std::sync::Arc;

use kiosklog_engine::{Database, KioskLogConfig, CONFIG_FILE_NAME};
use kiosklog_security::{AccessMode, IdentityProvider, OpenOptions};

use crate::{Command, Error, Executor, Output, Result};

/// High-level typed wrapper for activity log operations.
pub struct KioskLog {
    executor: Executor,
}

impl KioskLog {
    /// Open a database at the given path.
    ///
    /// The database will be created if it doesn't exist. Opens in
    /// read-write mode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, OpenOptions::default())
    }

    /// Open a database at the given path with explicit options.
    ///
    /// Overrides in `opts` are merged into `kiosklog.toml` before the
    /// database opens, so later plain `open` calls keep them. If the path is
    /// already open in this process with other settings, nothing is written
    /// and the call fails with `InvalidInput`.
    ///
    /// # Example
    ///
    /// ```text
    /// use kiosklog_executor::{AccessMode, KioskLog, OpenOptions};
    ///
    /// let log = KioskLog::open_with(
    ///     "/var/data/kiosks",
    ///     OpenOptions::new().access_mode(AccessMode::ReadOnly),
    /// )?;
    /// ```
    pub fn open_with<P: AsRef<Path>>(path: P, opts: OpenOptions) -> Result<Self> {
        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir).map_err(|e| Error::Internal {
            reason: format!("Failed to create data directory: {}", e),
        })?;

        // Read existing config (or defaults)
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        KioskLogConfig::write_default_if_missing(&config_path)?;
        let mut cfg = KioskLogConfig::from_file(&config_path)?;

        apply_overrides(&mut cfg, &opts);

        let db = Database::open_with_config(&data_dir, cfg)?;
        Ok(Self::from_database(db, opts.access_mode))
    }

    /// Create an ephemeral in-memory log.
    ///
    /// Useful for testing. Nothing is persisted.
    pub fn cache() -> Result<Self> {
        Self::cache_with(OpenOptions::default())
    }

    /// Create an ephemeral in-memory log with explicit options.
    ///
    /// The access mode and append strategy apply; durability has no effect
    /// since nothing reaches disk.
    pub fn cache_with(opts: OpenOptions) -> Result<Self> {
        let mut cfg = KioskLogConfig::default();
        apply_overrides(&mut cfg, &opts);
        let db = Database::cache_with_config(cfg)?;
        Ok(Self::from_database(db, opts.access_mode))
    }

    /// Wrap an already opened database.
    pub fn from_database(db: Arc<Database>, access_mode: AccessMode) -> Self {
        Self {
            executor: Executor::new_with_mode(db, access_mode),
        }
    }

    /// Act as the identity supplied by `provider`.
    pub fn with_identity(self, provider: impl IdentityProvider + 'static) -> Self {
        Self {
            executor: self.executor.with_identity(provider),
        }
    }

    /// The underlying executor, for command-level access.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Access mode this handle was opened with.
    pub fn access_mode(&self) -> AccessMode {
        self.executor.access_mode()
    }

    /// Check the database is reachable; returns the crate version.
    pub fn ping(&self) -> Result<String> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { version } => Ok(version),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Ping".into(),
            }),
        }
    }
}

fn apply_overrides(cfg: &mut KioskLogConfig, opts: &OpenOptions) {
    if let Some(ref dur) = opts.durability {
        cfg.durability = dur.clone();
    }
    if let Some(ref strategy) = opts.append_strategy {
        cfg.append_strategy = strategy.clone();
    }
}
