//! Query executor
//!
//! Full linear scan of the committed log through [`matches`]. Results keep
//! log order. There is no pagination or limit.

use crate::primitives::activity_store::ActivityStore;
use crate::primitives::filter::matches;
use kiosklog_core::{Activity, QuerySpec, Result};
use tracing::debug;

/// Runs filter queries over an activity store
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    store: ActivityStore,
}

impl QueryExecutor {
    /// Create an executor over `store`
    pub fn new(store: ActivityStore) -> Self {
        Self { store }
    }

    /// Every activity matching `spec`, in log order.
    ///
    /// # Errors
    /// `StorageUnavailable` or `Corruption` if the log cannot be read.
    pub fn run(&self, spec: &QuerySpec) -> Result<Vec<Activity>> {
        let mut scanned = 0usize;
        let mut out = Vec::new();
        for activity in self.store.iter()? {
            let activity = activity?;
            scanned += 1;
            if matches(&activity, spec) {
                out.push(activity);
            }
        }
        debug!(
            target: "kiosklog::query",
            predicates = spec.active_predicates(),
            scanned,
            matched = out.len(),
            "Query complete"
        );
        Ok(out)
    }

    /// Number of activities matching `spec`
    pub fn count(&self, spec: &QuerySpec) -> Result<u64> {
        let mut n = 0u64;
        for activity in self.store.iter()? {
            if matches(&activity?, spec) {
                n += 1;
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use kiosklog_core::{ActivityDraft, TimeRange};
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    fn draft(kiosk: &str) -> ActivityDraft {
        ActivityDraft {
            actor_type: "admin".into(),
            name: "Root".into(),
            activity_type: "audit".into(),
            kiosk_id: kiosk.into(),
            latitude: "0".into(),
            longitude: "0".into(),
            ..Default::default()
        }
    }

    fn seeded() -> QueryExecutor {
        let ticks = Arc::new(AtomicI64::new(100));
        let store = ActivityStore::with_clock(
            Database::cache().unwrap(),
            Arc::new(move || ticks.fetch_add(100, Ordering::SeqCst)),
        );
        for kiosk in ["K-1", "K-2", "K-1"] {
            store.append(draft(kiosk)).unwrap();
        }
        QueryExecutor::new(store)
    }

    #[test]
    fn test_empty_spec_returns_whole_log_in_order() {
        let exec = seeded();
        let ids: Vec<u64> = exec.run(&QuerySpec::all()).unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(exec.count(&QuerySpec::all()).unwrap(), 3);
    }

    #[test]
    fn test_filter_keeps_log_order() {
        let exec = seeded();
        let spec = QuerySpec::all().with_kiosk_ids(["K-1"]);
        let ids: Vec<u64> = exec.run(&spec).unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(exec.count(&spec).unwrap(), 2);
    }

    #[test]
    fn test_absent_kiosk_returns_empty() {
        let exec = seeded();
        assert!(exec.run(&QuerySpec::all().with_kiosk_ids(["K-404"])).unwrap().is_empty());
    }

    #[test]
    fn test_time_window() {
        let exec = seeded();
        let spec = QuerySpec::all().with_time_range(TimeRange::new(Some(150), Some(300)).unwrap());
        let stamps: Vec<i64> = exec.run(&spec).unwrap().iter().map(|a| a.timestamp).collect();
        assert_eq!(stamps, vec![200]);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let exec = seeded();
        let spec = QuerySpec::all().with_kiosk_ids(["K-2"]);
        assert_eq!(exec.run(&spec).unwrap(), exec.run(&spec).unwrap());
    }
}
