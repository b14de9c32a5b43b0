//! Activity data model
//!
//! An [`Activity`] is one immutable entry of the log: an actor performing an
//! action on zero or more resources at a kiosk, through a device, at a
//! point in time. Field names on the wire follow the original ledger format
//! (`activityId`, `actorType`, `kioskId`, `resourceOwner`, ...).
//!
//! Callers never build an `Activity` directly. They submit an
//! [`ActivityDraft`], which is validated into a [`ValidatedDraft`] and then
//! stamped with an id and timestamp by the activity store.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of flat fields that make up one resource tuple
pub const RESOURCE_TUPLE_LEN: usize = 4;

/// Kind of actor that performed an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    /// Platform administrator
    Admin,
    /// End user at a kiosk
    User,
    /// Vendor operating kiosks
    Vendor,
    /// Business customer
    Business,
}

impl ActorType {
    /// Wire name of the actor type
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Admin => "admin",
            ActorType::User => "user",
            ActorType::Vendor => "vendor",
            ActorType::Business => "business",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(ActorType::Admin),
            "user" => Ok(ActorType::User),
            "vendor" => Ok(ActorType::Vendor),
            "business" => Ok(ActorType::Business),
            other => Err(format!(
                "unknown actor type '{}', expected admin, user, vendor or business",
                other
            )),
        }
    }
}

/// Who performed the activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(rename = "actorType")]
    pub actor_type: ActorType,
    pub name: String,
    pub telephone: String,
    pub email: String,
}

/// Where the activity happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kiosk {
    #[serde(rename = "kioskId")]
    pub id: String,
    /// Decimal degrees
    pub latitude: f64,
    /// Decimal degrees
    pub longitude: f64,
    pub details: String,
}

/// Device the activity was recorded through
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "deviceType")]
    pub device_type: String,
    pub id1: String,
    pub id2: String,
    pub id3: String,
    pub id4: String,
}

/// A resource touched by the activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "resourceOwner")]
    pub owner: String,
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "resourceId")]
    pub id: String,
    pub details: String,
}

impl Resource {
    /// Build resources from a flat list of `(owner, type, id, details)` tuples.
    ///
    /// # Errors
    /// Returns `InvalidRecord` if the list length is not a multiple of four.
    pub fn from_flat(fields: &[String]) -> Result<Vec<Resource>> {
        if fields.len() % RESOURCE_TUPLE_LEN != 0 {
            return Err(Error::invalid_record(format!(
                "resources must be (owner, type, id, details) tuples; got {} fields",
                fields.len()
            )));
        }
        Ok(fields
            .chunks_exact(RESOURCE_TUPLE_LEN)
            .map(|c| Resource {
                owner: c[0].clone(),
                resource_type: c[1].clone(),
                id: c[2].clone(),
                details: c[3].clone(),
            })
            .collect())
    }
}

/// One immutable entry of the activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Position in the log, assigned by the store
    #[serde(rename = "activityId")]
    pub id: u64,
    pub actor: Actor,
    #[serde(rename = "activityType")]
    pub activity_type: String,
    pub kiosk: Kiosk,
    pub device: Device,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub remark: String,
    /// Milliseconds since the Unix epoch (UTC), captured at append time
    pub timestamp: i64,
}

/// Caller-supplied activity fields, before validation
///
/// Coordinates stay textual here so that the store can report an
/// unparseable value as [`Error::InvalidCoordinate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityDraft {
    pub actor_type: String,
    pub name: String,
    pub telephone: String,
    pub email: String,
    pub activity_type: String,
    pub kiosk_id: String,
    pub latitude: String,
    pub longitude: String,
    pub kiosk_details: String,
    pub remark: String,
    pub device: Device,
    pub resources: Vec<Resource>,
}

/// A draft that passed validation; only id and timestamp are missing
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    actor: Actor,
    activity_type: String,
    kiosk: Kiosk,
    device: Device,
    resources: Vec<Resource>,
    remark: String,
}

impl ActivityDraft {
    /// Check required fields and parse coordinates.
    ///
    /// Required: actor type (one of admin/user/vendor/business), actor name,
    /// activity type and kiosk id. Everything else may be empty.
    ///
    /// # Errors
    /// - `InvalidRecord` if a required field is empty or the actor type is unknown
    /// - `InvalidCoordinate` if latitude/longitude is not a finite number
    pub fn validate(self) -> Result<ValidatedDraft> {
        require("actor type", &self.actor_type)?;
        require("actor name", &self.name)?;
        require("activity type", &self.activity_type)?;
        require("kiosk id", &self.kiosk_id)?;

        let actor_type = self.actor_type.parse::<ActorType>().map_err(Error::invalid_record)?;
        let latitude = parse_coordinate("latitude", &self.latitude)?;
        let longitude = parse_coordinate("longitude", &self.longitude)?;

        Ok(ValidatedDraft {
            actor: Actor {
                actor_type,
                name: self.name,
                telephone: self.telephone,
                email: self.email,
            },
            activity_type: self.activity_type,
            kiosk: Kiosk {
                id: self.kiosk_id,
                latitude,
                longitude,
                details: self.kiosk_details,
            },
            device: self.device,
            resources: self.resources,
            remark: self.remark,
        })
    }
}

impl ValidatedDraft {
    /// Stamp the draft with its log position and creation time
    pub fn into_activity(self, id: u64, timestamp: i64) -> Activity {
        Activity {
            id,
            actor: self.actor,
            activity_type: self.activity_type,
            kiosk: self.kiosk,
            device: self.device,
            resources: self.resources,
            remark: self.remark,
            timestamp,
        }
    }

    /// Activity type of the draft, for logging before an id exists
    pub fn activity_type(&self) -> &str {
        &self.activity_type
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_record(format!("{} is required", field)));
    }
    Ok(())
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidCoordinate {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch (UTC)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
