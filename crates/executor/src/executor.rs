//! The Executor - single entry point to the kiosklog engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! activity store, the query executor or the raw key namespace, and converts
//! results to outputs.

use std::fmt;
use std::sync::Arc;

use kiosklog_engine::{ActivityStore, Clock, Database, QueryExecutor};
use kiosklog_security::{AccessMode, IdentityProvider, StaticIdentity};
use tracing::{debug, warn};

use crate::handlers::{activity, raw};
use crate::{Command, Error, Output, Result};

/// User name of the identity an executor acts as when none is supplied
pub const LOCAL_USER: &str = "local";

/// The command executor - single entry point to the kiosklog engine.
///
/// The Executor is **stateless**: it holds handles to the database but
/// maintains no state of its own. All state lives in the ledger.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use kiosklog_executor::{Command, Executor};
/// use kiosklog_engine::Database;
///
/// let executor = Executor::new(Database::cache()?);
///
/// let results = executor.execute_many(vec![
///     Command::ActivityLen,
///     Command::GetActivity { id: 0 },
/// ]);
/// ```
pub struct Executor {
    db: Arc<Database>,
    store: ActivityStore,
    query: QueryExecutor,
    identity: Arc<dyn IdentityProvider>,
    access_mode: AccessMode,
}

impl Executor {
    /// Create a read-write executor acting as a local administrator.
    pub fn new(db: Arc<Database>) -> Self {
        Self::new_with_mode(db, AccessMode::ReadWrite)
    }

    /// Create an executor with an explicit access mode.
    ///
    /// In [`AccessMode::ReadOnly`] every write command fails with
    /// [`Error::AccessDenied`] before it reaches the engine.
    pub fn new_with_mode(db: Arc<Database>, access_mode: AccessMode) -> Self {
        let store = ActivityStore::new(Arc::clone(&db));
        Self {
            query: QueryExecutor::new(store.clone()),
            store,
            db,
            identity: Arc::new(StaticIdentity::admin(LOCAL_USER)),
            access_mode,
        }
    }

    /// Replace the source of the caller's identity.
    pub fn with_identity(mut self, provider: impl IdentityProvider + 'static) -> Self {
        self.identity = Arc::new(provider);
        self
    }

    /// Replace the timestamp source used for new activities.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.store = ActivityStore::with_clock(Arc::clone(&self.db), clock);
        self.query = QueryExecutor::new(self.store.clone());
        self
    }

    /// Access mode this executor enforces
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    /// The underlying database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        debug!(target: "kiosklog::executor", command = cmd.name(), "Executing command");

        if cmd.is_write() && self.access_mode == AccessMode::ReadOnly {
            return Err(Error::AccessDenied {
                command: cmd.name().to_string(),
            });
        }

        match cmd {
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),

            // Activity log
            Command::CreateActivity(req) => {
                self.authorize_create("CreateActivity")?;
                activity::create_activity(&self.store, req)
            }
            Command::ViewActivities(req) => activity::view_activities(&self.query, &req),
            Command::CountActivities(req) => activity::count_activities(&self.query, &req),
            Command::GetActivity { id } => activity::get_activity(&self.store, id),
            Command::ActivityLen => activity::activity_len(&self.store),

            // Raw keys
            Command::ReadKey { key } => raw::read_key(&self.db, key),
            Command::WriteKey { key, value } => raw::write_key(&self.db, key, value),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Every command runs regardless of earlier failures; results are
    /// returned in the same order as the input.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    fn authorize_create(&self, command: &str) -> Result<()> {
        let identity = self.identity.current()?;
        if identity.role.can_create_activity() {
            return Ok(());
        }
        warn!(
            target: "kiosklog::executor",
            user = %identity.username,
            role = %identity.role,
            command,
            "Permission denied"
        );
        Err(Error::PermissionDenied {
            command: command.to_string(),
            role: identity.role.to_string(),
        })
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("db", &self.db)
            .field("access_mode", &self.access_mode)
            .finish()
    }
}
