//! # kiosklog Executor
//!
//! The public API for kiosklog, an append-only activity log for kiosk
//! fleets with a filter-query engine.
//!
//! This is the only crate users need to import. It provides:
//! - [`KioskLog`] - The typed database interface
//! - [`CreateActivityRequest`]/[`ViewActivitiesRequest`] - Request types
//! - [`Command`]/[`Output`] - Low-level command interface (for the CLI)
//!
//! ## Quick Start
//!
//! ```text
//! use kiosklog_executor::{KioskLog, ViewActivitiesRequest};
//!
//! let log = KioskLog::open("/path/to/data")?;
//! let everything = log.view_activities(&ViewActivitiesRequest::default())?;
//! ```
//!
//! ## Access control
//!
//! | Check | Failure |
//! |-------|---------|
//! | Database opened read-only, write command | `AccessDenied` |
//! | Caller role not admin/vendor, `CreateActivity` | `PermissionDenied` |
//! | No caller identity, `CreateActivity` | `Unauthenticated` |

#![warn(missing_docs)]

mod api;
mod command;
mod convert;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::KioskLog;
pub use command::Command;
pub use error::Error;
pub use executor::{Executor, LOCAL_USER};
pub use output::Output;
pub use types::*;

// Re-export the record model so users don't need kiosklog-core directly
pub use kiosklog_core::{Activity, Actor, ActorType, Device, Kiosk, Resource};

// Re-export security types so users don't need kiosklog-security directly
pub use kiosklog_security::{
    AccessMode, Anonymous, Identity, IdentityError, IdentityProvider, OpenOptions, Role,
    StaticIdentity,
};

// Re-export configuration types so users don't need kiosklog-engine directly
pub use kiosklog_engine::{Clock, KioskLogConfig, CONFIG_FILE_NAME};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
