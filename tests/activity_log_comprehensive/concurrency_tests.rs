//! Tier 3: concurrent appends.

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

use crate::test_utils::*;
use kiosklog::{KioskLog, OpenOptions};

fn hammer(log: Arc<KioskLog>, threads: usize, per_thread: usize) -> Vec<u64> {
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let log = Arc::clone(&log);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|_| log.create_activity(restock(&format!("K-{}", t))).unwrap().id)
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect()
}

fn assert_no_lost_appends(log: &KioskLog, ids: Vec<u64>, expected: u64) {
    let unique: BTreeSet<u64> = ids.into_iter().collect();
    assert_eq!(unique.len() as u64, expected);
    assert_eq!(unique, (0..expected).collect::<BTreeSet<u64>>());
    assert_eq!(log.activity_len().unwrap(), expected);

    let stored: Vec<u64> = log
        .view_activities(&everything())
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(stored, (0..expected).collect::<Vec<u64>>());
}

#[test]
fn test_optimistic_appends_are_never_lost() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(
        KioskLog::open_with(dir.path(), OpenOptions::new().append_strategy("optimistic")).unwrap(),
    );
    let ids = hammer(Arc::clone(&log), 8, 25);
    assert_no_lost_appends(&log, ids, 200);
}

#[test]
fn test_serialized_appends_are_never_lost() {
    let dir = tempfile::tempdir().unwrap();
    let log = Arc::new(
        KioskLog::open_with(dir.path(), OpenOptions::new().append_strategy("serialized")).unwrap(),
    );
    let ids = hammer(Arc::clone(&log), 8, 25);
    assert_no_lost_appends(&log, ids, 200);
}

#[test]
fn test_per_kiosk_counts_add_up() {
    let log = Arc::new(KioskLog::cache().unwrap());
    hammer(Arc::clone(&log), 4, 30);
    for t in 0..4 {
        let req = kiosklog::ViewActivitiesRequest {
            kiosk_ids: vec![format!("K-{}", t)],
            ..Default::default()
        };
        assert_eq!(log.count_activities(&req).unwrap(), 30);
    }
}
