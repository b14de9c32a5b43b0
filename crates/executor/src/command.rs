//! Command enum defining all kiosklog operations.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: One JSON object per command, as read by the CLI
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

use crate::types::{CreateActivityRequest, ViewActivitiesRequest};

/// A command is a self-contained, serializable operation.
///
/// | Command | Output | Write |
/// |---------|--------|-------|
/// | `Ping` | `Pong` | no |
/// | `CreateActivity` | `Activity` | yes |
/// | `ViewActivities` | `Activities` | no |
/// | `CountActivities` | `Uint` | no |
/// | `GetActivity` | `MaybeActivity` | no |
/// | `ActivityLen` | `Uint` | no |
/// | `ReadKey` | `Text` | no |
/// | `WriteKey` | `Unit` | yes |
///
/// # Example
///
/// ```ignore
/// let cmd: Command = serde_json::from_str(
///     r#"{"ViewActivities":{"kioskIds":["K-1"],"startTime":"2024-01-01T00:00:00Z"}}"#,
/// )?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Database ====================
    /// Liveness check.
    /// Returns: `Output::Pong`
    Ping,

    // ==================== Activity log ====================
    /// Append a new activity.
    /// Returns: `Output::Activity`
    CreateActivity(CreateActivityRequest),

    /// Every activity matching the filters, in log order.
    /// Returns: `Output::Activities`
    ViewActivities(ViewActivitiesRequest),

    /// Number of activities matching the filters.
    /// Returns: `Output::Uint`
    CountActivities(ViewActivitiesRequest),

    /// One activity by id.
    /// Returns: `Output::MaybeActivity`
    GetActivity { id: u64 },

    /// Number of activities in the log.
    /// Returns: `Output::Uint`
    ActivityLen,

    // ==================== Raw keys ====================
    /// Read a raw key.
    /// Returns: `Output::Text`
    ReadKey { key: String },

    /// Write a raw key.
    /// Returns: `Output::Unit`
    WriteKey { key: String, value: String },
}

impl Command {
    /// Returns `true` if this command performs a write operation.
    ///
    /// Used by the access-mode guard to reject writes when the database
    /// is opened in read-only mode.
    pub fn is_write(&self) -> bool {
        matches!(self, Command::CreateActivity(_) | Command::WriteKey { .. })
    }

    /// Returns the variant name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::CreateActivity(_) => "CreateActivity",
            Command::ViewActivities(_) => "ViewActivities",
            Command::CountActivities(_) => "CountActivities",
            Command::GetActivity { .. } => "GetActivity",
            Command::ActivityLen => "ActivityLen",
            Command::ReadKey { .. } => "ReadKey",
            Command::WriteKey { .. } => "WriteKey",
        }
    }
}
