//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant. The mapping is
//! deterministic: the same command always produces the same variant.

use kiosklog_core::Activity;
use serde::{Deserialize, Serialize};

/// Successful command execution results.
///
/// # Example
///
/// ```text
/// match executor.execute(Command::GetActivity { id: 3 })? {
///     Output::MaybeActivity(Some(a)) => println!("{}", a.activity_type),
///     Output::MaybeActivity(None) => println!("no such activity"),
///     _ => unreachable!("GetActivity always returns MaybeActivity"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value
    Unit,

    /// Unsigned integer result (counts, lengths)
    Uint(u64),

    /// Text result (raw key reads)
    Text(String),

    /// Ping response
    Pong {
        /// Crate version
        version: String,
    },

    /// The activity that was just appended
    Activity(Activity),

    /// An activity that may not exist
    MaybeActivity(Option<Activity>),

    /// Query results in log order
    Activities(Vec<Activity>),
}
