//! Query specification for activity filters
//!
//! A [`QuerySpec`] holds one optional predicate per filterable field. Set
//! predicates are satisfied by membership; an empty set places no
//! constraint. The matching itself lives in the engine's filter module,
//! which only needs the data model.

use crate::activity::ActorType;
use crate::error::{Error, Result};
use chrono::DateTime;
use std::collections::BTreeSet;

/// Half-open time interval `[start, end)` in epoch milliseconds
///
/// Either bound may be open. With both bounds open the range is inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound
    pub start: Option<i64>,
    /// Exclusive upper bound
    pub end: Option<i64>,
}

impl TimeRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `InvalidQuery` for an inverted range.
    pub fn new(start: Option<i64>, end: Option<i64>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(Error::invalid_query(format!(
                    "time range start {} is after end {}",
                    s, e
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// True if at least one bound is set
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// `start <= ts < end`, treating open bounds as unbounded
    pub fn contains(&self, ts: i64) -> bool {
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts < e)
    }
}

/// Per-entry constraints on an activity's resource list
///
/// A record passes when one single resource entry satisfies every active
/// sub-predicate; owner from one entry and type from another do not combine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub owners: BTreeSet<String>,
    pub types: BTreeSet<String>,
    pub ids: BTreeSet<String>,
}

impl ResourceFilter {
    /// True if any resource sub-predicate is set
    pub fn is_active(&self) -> bool {
        !self.owners.is_empty() || !self.types.is_empty() || !self.ids.is_empty()
    }
}

/// Conjunction of per-field predicates over activities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pub ids: BTreeSet<u64>,
    pub actor_types: BTreeSet<ActorType>,
    pub names: BTreeSet<String>,
    pub telephones: BTreeSet<String>,
    pub emails: BTreeSet<String>,
    pub activity_types: BTreeSet<String>,
    pub kiosk_ids: BTreeSet<String>,
    pub device_types: BTreeSet<String>,
    pub device_id1s: BTreeSet<String>,
    pub device_id2s: BTreeSet<String>,
    pub device_id3s: BTreeSet<String>,
    pub device_id4s: BTreeSet<String>,
    pub resources: ResourceFilter,
    pub time_range: TimeRange,
}

impl QuerySpec {
    /// A spec that matches every activity
    pub fn all() -> Self {
        Self::default()
    }

    /// Number of active predicates (resource sub-fields count once)
    pub fn active_predicates(&self) -> usize {
        let sets = [
            self.names.is_empty(),
            self.telephones.is_empty(),
            self.emails.is_empty(),
            self.activity_types.is_empty(),
            self.kiosk_ids.is_empty(),
            self.device_types.is_empty(),
            self.device_id1s.is_empty(),
            self.device_id2s.is_empty(),
            self.device_id3s.is_empty(),
            self.device_id4s.is_empty(),
        ];
        sets.iter().filter(|empty| !**empty).count()
            + usize::from(!self.ids.is_empty())
            + usize::from(!self.actor_types.is_empty())
            + usize::from(self.resources.is_active())
            + usize::from(self.time_range.is_active())
    }

    /// True if no predicate is active
    pub fn is_unconstrained(&self) -> bool {
        self.active_predicates() == 0
    }

    pub fn with_ids(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.ids.extend(ids);
        self
    }

    pub fn with_actor_types(mut self, types: impl IntoIterator<Item = ActorType>) -> Self {
        self.actor_types.extend(types);
        self
    }

    pub fn with_kiosk_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.kiosk_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_activity_types<S: Into<String>>(
        mut self,
        types: impl IntoIterator<Item = S>,
    ) -> Self {
        self.activity_types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_resource_owners<S: Into<String>>(
        mut self,
        owners: impl IntoIterator<Item = S>,
    ) -> Self {
        self.resources.owners.extend(owners.into_iter().map(Into::into));
        self
    }

    pub fn with_resource_types<S: Into<String>>(
        mut self,
        types: impl IntoIterator<Item = S>,
    ) -> Self {
        self.resources.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn with_resource_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.resources.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = range;
        self
    }
}

/// Parse a time bound given as epoch milliseconds or an RFC 3339 timestamp.
///
/// Blank input means "no bound".
///
/// # Errors
/// Returns `InvalidQuery` if the value is neither form.
pub fn parse_time_bound(raw: &str) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Ok(Some(ms));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Some(dt.timestamp_millis()))
        .map_err(|e| Error::invalid_query(format!("invalid time bound '{}': {}", raw, e)))
}

/// Parse a set of activity ids.
///
/// # Errors
/// Returns `InvalidQuery` on the first value that is not a non-negative integer.
pub fn parse_id_set<S: AsRef<str>>(raw: &[S]) -> Result<BTreeSet<u64>> {
    raw.iter()
        .map(|s| {
            let s = s.as_ref().trim();
            s.parse::<u64>()
                .map_err(|_| Error::invalid_query(format!("invalid activity id '{}'", s)))
        })
        .collect()
}

/// Parse a set of actor types.
///
/// # Errors
/// Returns `InvalidQuery` for an unknown actor type.
pub fn parse_actor_type_set<S: AsRef<str>>(raw: &[S]) -> Result<BTreeSet<ActorType>> {
    raw.iter()
        .map(|s| s.as_ref().parse::<ActorType>().map_err(Error::invalid_query))
        .collect()
}
