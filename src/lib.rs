//! kiosklog - append-only activity log for kiosk fleets
//!
//! Every action taken at a kiosk (a restock, a pickup, an audit) is recorded
//! as an immutable [`Activity`] and can later be retrieved with
//! multi-predicate filter queries.
//!
//! # Quick Start
//!
//! ```ignore
//! use kiosklog::{CreateActivityRequest, KioskLog, ViewActivitiesRequest};
//!
//! // Create an in-memory log
//! let log = KioskLog::cache()?;
//!
//! log.create_activity(CreateActivityRequest {
//!     actor_type: "vendor".into(),
//!     name: "Ada".into(),
//!     activity_type: "restock".into(),
//!     kiosk_id: "K-1".into(),
//!     latitude: "52.52".into(),
//!     longitude: "13.405".into(),
//!     ..Default::default()
//! })?;
//!
//! let everything = log.view_activities(&ViewActivitiesRequest::default())?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The [`KioskLog`] struct provides a convenient high-level interface.
//!
//! Internal implementation details (storage, engine) are not exposed - only
//! the executor API is public.

// Re-export the public API from kiosklog-executor
pub use kiosklog_executor::*;
