//! Access control for kiosklog.
//!
//! This crate provides:
//! - [`AccessMode`] and [`OpenOptions`], which control how a database is
//!   opened and whether writes are permitted at all
//! - [`Role`], [`Identity`] and [`IdentityProvider`], which decide who may
//!   record activities

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Controls whether the database allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode: every write command returns an error.
    ReadOnly,
}

/// Options for opening a database.
///
/// Any field set to `Some` overrides the corresponding value in
/// `kiosklog.toml`.
///
/// ```ignore
/// use kiosklog_security::{AccessMode, OpenOptions};
///
/// let opts = OpenOptions::new()
///     .access_mode(AccessMode::ReadOnly)
///     .durability("always");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// The access mode for the database.
    pub access_mode: AccessMode,
    /// Override durability mode: `"standard"` or `"always"`.
    pub durability: Option<String>,
    /// Override append strategy: `"optimistic"` or `"serialized"`.
    pub append_strategy: Option<String>,
}

impl OpenOptions {
    /// Create a new `OpenOptions` with default settings (read-write mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode for the database.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the durability mode (`"standard"` or `"always"`).
    pub fn durability(mut self, mode: &str) -> Self {
        self.durability = Some(mode.to_string());
        self
    }

    /// Set the append strategy (`"optimistic"` or `"serialized"`).
    pub fn append_strategy(mut self, strategy: &str) -> Self {
        self.append_strategy = Some(strategy.to_string());
        self
    }
}

/// Role attribute carried by a caller's identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// End user
    User,
    /// Kiosk vendor
    Vendor,
    /// Business customer
    Business,
}

impl Role {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Vendor => "vendor",
            Role::Business => "business",
        }
    }

    /// Only administrators and vendors may record activities.
    pub fn can_create_activity(&self) -> bool {
        matches!(self, Role::Admin | Role::Vendor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "vendor" => Ok(Role::Vendor),
            "business" => Ok(Role::Business),
            _ => Err(IdentityError::UnknownRole(s.to_string())),
        }
    }
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Caller's user name
    pub username: String,
    /// Caller's role attribute
    pub role: Role,
}

impl Identity {
    /// Build an identity
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

/// Failure to establish who the caller is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No identity is attached to the current request
    #[error("no caller identity available")]
    Missing,
    /// The role attribute is not one of admin/user/vendor/business
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Source of the identity for the current request
pub trait IdentityProvider: Send + Sync {
    /// Identity of the caller
    fn current(&self) -> Result<Identity, IdentityError>;
}

/// Identity provider that always returns the same caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity(Identity);

impl StaticIdentity {
    /// Provider for `identity`
    pub fn new(identity: Identity) -> Self {
        Self(identity)
    }

    /// Administrator identity, for tools and tests
    pub fn admin(username: impl Into<String>) -> Self {
        Self(Identity::new(username, Role::Admin))
    }
}

impl IdentityProvider for StaticIdentity {
    fn current(&self) -> Result<Identity, IdentityError> {
        Ok(self.0.clone())
    }
}

/// Identity provider for callers that never authenticated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current(&self) -> Result<Identity, IdentityError> {
        Err(IdentityError::Missing)
    }
}
