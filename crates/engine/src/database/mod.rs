//! Database struct and open logic
//!
//! This module provides the Database handle that orchestrates:
//! - Data directory and config file management
//! - Ledger selection (WAL-backed on disk, in-memory for `cache()`)
//! - Guarded commits with the configured append strategy
//!
//! ## Guarded Commits
//!
//! Every append reads the log index, builds a batch guarded by the index
//! version it read, and commits. Under `optimistic` a lost race surfaces as
//! `WriteConflict` and the whole read-build-commit cycle is retried with
//! backoff. Under `serialized` the cycle runs inside a process-wide lock, so
//! the guard only fails if another process touches the same ledger.

pub mod config;
mod registry;
mod retry;

pub use config::{AppendStrategy, KioskLogConfig, CONFIG_FILE_NAME};
pub use registry::OPEN_DATABASES;
pub use retry::RetryConfig;

use kiosklog_core::{Error, Ledger, Result, Version, WriteBatch};
use kiosklog_storage::{DurabilityMode, MemoryLedger, WalLedger};
use parking_lot::Mutex;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// WAL file name inside the data directory
pub const WAL_FILE_NAME: &str = "activity.wal";

/// Lock file preventing two processes from opening the same directory
const LOCK_FILE_NAME: &str = ".lock";

/// Controls where data is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersistenceMode {
    /// No disk files at all; data is lost when the database is dropped
    Ephemeral,
    /// WAL file in the data directory
    Disk,
}

/// Main database handle
///
/// Owns the ledger and the append policy. Create one with
/// [`Database::open`] or [`Database::cache`] and share it as
/// `Arc<Database>`.
///
/// # Example
///
/// ```text
/// use kiosklog_engine::{ActivityStore, Database};
///
/// let db = Database::open("/var/lib/kiosklog")?;
/// let store = ActivityStore::new(db);
/// ```
pub struct Database {
    /// Data directory path (empty for ephemeral databases)
    data_dir: PathBuf,

    /// Backing key-value ledger
    ledger: Arc<dyn Ledger>,

    /// Persistence mode (ephemeral vs disk-backed)
    persistence_mode: PersistenceMode,

    /// Configuration the database was opened with (mirrors kiosklog.toml)
    config: KioskLogConfig,

    /// Parsed `config.append_strategy`
    append_strategy: AppendStrategy,

    /// Parsed retry settings
    retry: RetryConfig,

    /// Single-writer section for the serialized strategy
    append_lock: Mutex<()>,

    /// Exclusive lock on the data directory, released on drop
    _lock_file: Option<File>,
}

impl Database {
    /// Open the database at the given directory.
    ///
    /// Reads `kiosklog.toml` from the data directory, creating it with
    /// defaults if missing. Opening the same path again in this process
    /// returns the same `Arc<Database>`.
    ///
    /// # Errors
    ///
    /// Fails if the config is invalid, or if the directory, lock file or WAL
    /// cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        KioskLogConfig::write_default_if_missing(&config_path)?;
        let cfg = KioskLogConfig::from_file(&config_path)?;

        Self::open_internal(&data_dir, cfg, false)
    }

    /// Open the database with an explicit configuration.
    ///
    /// The supplied config is written to `kiosklog.toml` so that later
    /// `Database::open()` calls pick up the same settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the path is already open in this process
    /// with different settings. The config file is left untouched.
    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: KioskLogConfig) -> Result<Arc<Self>> {
        cfg.validate()?;

        let data_dir = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        Self::open_internal(&data_dir, cfg, true)
    }

    fn open_internal(data_dir: &Path, cfg: KioskLogConfig, explicit: bool) -> Result<Arc<Self>> {
        let canonical_path = data_dir.canonicalize()?;

        // Held for the whole open so two threads cannot race to create the same instance
        let mut registry = OPEN_DATABASES.lock();
        if let Some(db) = registry.get(&canonical_path).and_then(|weak| weak.upgrade()) {
            if explicit && !db.config.same_settings(&cfg) {
                return Err(Error::invalid_config(format!(
                    "database at '{}' is already open with durability '{}' and append strategy '{}'",
                    canonical_path.display(),
                    db.config.durability,
                    db.config.append_strategy
                )));
            }
            info!(target: "kiosklog::db", path = ?canonical_path, "Returning existing database instance");
            return Ok(db);
        }

        if explicit {
            cfg.write_to_file(&canonical_path.join(CONFIG_FILE_NAME))?;
        }

        let lock_file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(canonical_path.join(LOCK_FILE_NAME))
            .map_err(|e| Error::storage_unavailable(format!("failed to open lock file: {}", e)))?;
        fs2::FileExt::try_lock_exclusive(&lock_file).map_err(|_| {
            Error::storage_unavailable(format!(
                "database at '{}' is already in use by another process",
                canonical_path.display()
            ))
        })?;

        let mode = cfg.durability_mode()?;
        let ledger = WalLedger::open(canonical_path.join(WAL_FILE_NAME), mode).map_err(|e| {
            Error::storage_unavailable(format!("failed to open write-ahead log: {}", e))
        })?;

        info!(
            target: "kiosklog::db",
            path = ?canonical_path,
            durability = %mode,
            append_strategy = %cfg.append_strategy,
            version = ledger.current_version().as_u64(),
            "Database opened"
        );

        let db = Arc::new(Self::assemble(
            canonical_path.clone(),
            Arc::new(ledger),
            PersistenceMode::Disk,
            cfg,
            Some(lock_file),
        )?);
        registry.insert(canonical_path, Arc::downgrade(&db));
        Ok(db)
    }

    /// Create an ephemeral in-memory database with default settings.
    ///
    /// No files are created and nothing survives the process. Ephemeral
    /// databases are never shared through the registry.
    pub fn cache() -> Result<Arc<Self>> {
        Self::cache_with_config(KioskLogConfig::default())
    }

    /// Create an ephemeral database with explicit append settings.
    ///
    /// `durability` is ignored since nothing is written to disk.
    pub fn cache_with_config(cfg: KioskLogConfig) -> Result<Arc<Self>> {
        Self::with_ledger(Arc::new(MemoryLedger::new()), cfg)
    }

    /// Build a database over a caller-supplied ledger.
    pub fn with_ledger(ledger: Arc<dyn Ledger>, cfg: KioskLogConfig) -> Result<Arc<Self>> {
        cfg.validate()?;
        Ok(Arc::new(Self::assemble(
            PathBuf::new(),
            ledger,
            PersistenceMode::Ephemeral,
            cfg,
            None,
        )?))
    }

    fn assemble(
        data_dir: PathBuf,
        ledger: Arc<dyn Ledger>,
        persistence_mode: PersistenceMode,
        config: KioskLogConfig,
        lock_file: Option<File>,
    ) -> Result<Self> {
        let append_strategy = config.append_strategy()?;
        let retry = config.retry_config();
        Ok(Self {
            data_dir,
            ledger,
            persistence_mode,
            config,
            append_strategy,
            retry,
            append_lock: Mutex::new(()),
            _lock_file: lock_file,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The backing ledger
    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    /// Configuration the database was opened with
    pub fn config(&self) -> &KioskLogConfig {
        &self.config
    }

    /// Data directory (empty for ephemeral databases)
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// True if nothing is persisted
    pub fn is_cache(&self) -> bool {
        self.persistence_mode == PersistenceMode::Ephemeral
    }

    /// Durability mode in effect; ephemeral databases report the config value
    pub fn durability_mode(&self) -> DurabilityMode {
        self.config.durability_mode().unwrap_or_default()
    }

    /// Append strategy in effect
    pub fn append_strategy(&self) -> AppendStrategy {
        self.append_strategy
    }

    /// Retry policy for conflicting appends
    pub fn retry_config(&self) -> RetryConfig {
        self.retry
    }

    /// Version of the most recent ledger commit
    pub fn current_version(&self) -> Version {
        self.ledger.current_version()
    }

    // ========================================================================
    // Commit protocol
    // ========================================================================

    /// Build and commit a guarded batch, retrying the whole cycle on conflict.
    ///
    /// `build` reads whatever it needs from the ledger and returns the batch
    /// together with the value to hand back once it commits. It runs again
    /// from scratch after every conflict, so it must not have side effects.
    ///
    /// # Errors
    ///
    /// Errors from `build` and non-conflict commit errors are returned as-is.
    /// Running out of retries yields `StorageUnavailable`.
    pub(crate) fn commit_guarded<F, T>(&self, build: F) -> Result<T>
    where
        F: Fn(&dyn Ledger) -> Result<(WriteBatch, T)>,
    {
        let _serial = match self.append_strategy {
            AppendStrategy::Serialized => Some(self.append_lock.lock()),
            AppendStrategy::Optimistic => None,
        };

        let retry = self.retry;
        for attempt in 0..=retry.max_retries {
            let (batch, value) = build(self.ledger())?;
            match self.ledger.commit(batch) {
                Ok(_) => return Ok(value),
                Err(e) if e.is_conflict() => {
                    if attempt < retry.max_retries {
                        let delay = retry.calculate_delay(attempt);
                        warn!(
                            target: "kiosklog::db",
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Append lost the index race, retrying"
                        );
                        std::thread::sleep(delay);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            target: "kiosklog::db",
            attempts = retry.max_retries + 1,
            "Append abandoned after repeated conflicts"
        );
        Err(Error::storage_unavailable(format!(
            "append abandoned after {} conflicting attempts",
            retry.max_retries + 1
        )))
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("data_dir", &self.data_dir)
            .field("persistence_mode", &self.persistence_mode)
            .field("append_strategy", &self.append_strategy)
            .field("version", &self.ledger.current_version())
            .finish()
    }
}
