//! Core types and traits for kiosklog
//!
//! This crate defines the foundational types used throughout the system:
//! - Activity model: Activity, Actor, Kiosk, Device, Resource, ActivityDraft
//! - QuerySpec: per-field filter predicates, TimeRange, ResourceFilter
//! - Key/Version: ledger addressing and commit versions
//! - Ledger: the durable key-value store trait, with WriteBatch
//! - Error: error type hierarchy

#![warn(clippy::all)]

pub mod activity;
pub mod error;
pub mod query;
pub mod traits;
pub mod types;

pub use activity::{
    now_millis, Activity, ActivityDraft, Actor, ActorType, Device, Kiosk, Resource,
    ValidatedDraft, RESOURCE_TUPLE_LEN,
};
pub use error::{Error, Result};
pub use query::{
    parse_actor_type_set, parse_id_set, parse_time_bound, QuerySpec, ResourceFilter, TimeRange,
};
pub use traits::{Ledger, WriteBatch};
pub use types::{Key, Version, VersionedBytes};
