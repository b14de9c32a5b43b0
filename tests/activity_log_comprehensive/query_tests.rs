//! Tier 2: query semantics.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::test_utils::*;
use kiosklog::{
    Activity, Command, Error, Executor, KioskLog, Output, ViewActivitiesRequest,
};

fn view(executor: &Executor, req: ViewActivitiesRequest) -> Vec<Activity> {
    match executor.execute(Command::ViewActivities(req)).unwrap() {
        Output::Activities(list) => list,
        other => panic!("expected Activities, got {:?}", other),
    }
}

fn ids(list: &[Activity]) -> Vec<u64> {
    list.iter().map(|a| a.id).collect()
}

/// Seven activities over three kiosks, two roles and mixed resources
fn seeded() -> KioskLog {
    let log = KioskLog::cache().unwrap();

    let mut r0 = restock("K-1");
    r0.resources = resources(&[("alice", "locker", "L-1", "")]);
    let mut r1 = restock("K-2");
    r1.actor_type = "admin".into();
    r1.activity_type = "audit".into();
    let mut r2 = restock("K-1");
    r2.resources = resources(&[("alice", "locker", "L-2", ""), ("bob", "parcel", "P-9", "")]);
    let mut r3 = restock("K-3");
    r3.device_type = "phone".into();
    let mut r4 = restock("K-2");
    r4.resources = resources(&[("bob", "locker", "L-1", "")]);
    let mut r5 = restock("K-1");
    r5.email = "ops@example.com".into();
    let r6 = restock("K-3");

    for req in [r0, r1, r2, r3, r4, r5, r6] {
        log.create_activity(req).unwrap();
    }
    log
}

#[test]
fn test_empty_query_returns_whole_log_in_order() {
    let log = seeded();
    assert_eq!(ids(&log.view_activities(&everything()).unwrap()), vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_absent_kiosk_returns_nothing() {
    let log = seeded();
    let req = ViewActivitiesRequest {
        kiosk_ids: vec!["K-404".into(), "K-405".into()],
        ..Default::default()
    };
    assert!(log.view_activities(&req).unwrap().is_empty());
    assert_eq!(log.count_activities(&req).unwrap(), 0);
}

#[test]
fn test_set_membership_and_conjunction() {
    let log = seeded();
    let req = ViewActivitiesRequest {
        kiosk_ids: vec!["K-1".into(), "K-2".into()],
        actor_types: vec!["vendor".into()],
        ..Default::default()
    };
    assert_eq!(ids(&log.view_activities(&req).unwrap()), vec![0, 2, 4, 5]);

    let req = ViewActivitiesRequest {
        kiosk_ids: vec!["K-1".into()],
        emails: vec!["ops@example.com".into()],
        ..Default::default()
    };
    assert_eq!(ids(&log.view_activities(&req).unwrap()), vec![5]);
}

#[test]
fn test_id_and_device_filters() {
    let log = seeded();
    let req = ViewActivitiesRequest {
        ids: vec!["3".into(), "6".into(), "99".into()],
        ..Default::default()
    };
    assert_eq!(ids(&log.view_activities(&req).unwrap()), vec![3, 6]);

    let req = ViewActivitiesRequest {
        device_types: vec!["phone".into()],
        ..Default::default()
    };
    assert_eq!(ids(&log.view_activities(&req).unwrap()), vec![3]);
}

#[test]
fn test_resource_owner_filter() {
    let log = seeded();
    let req = ViewActivitiesRequest {
        resource_owners: vec!["alice".into()],
        ..Default::default()
    };
    assert_eq!(ids(&log.view_activities(&req).unwrap()), vec![0, 2]);
}

#[test]
fn test_resource_subfilters_bind_to_one_entry() {
    let log = seeded();
    // Activity 2 has alice/locker and bob/parcel; alice+parcel must not match it
    let crossed = ViewActivitiesRequest {
        resource_owners: vec!["alice".into()],
        resource_types: vec!["parcel".into()],
        ..Default::default()
    };
    assert!(log.view_activities(&crossed).unwrap().is_empty());

    let same_entry = ViewActivitiesRequest {
        resource_owners: vec!["bob".into()],
        resource_ids: vec!["L-1".into()],
        ..Default::default()
    };
    assert_eq!(ids(&log.view_activities(&same_entry).unwrap()), vec![4]);
}

#[test]
fn test_time_window_is_half_open() {
    let ticks = Arc::new(AtomicI64::new(100));
    let log = KioskLog::cache().unwrap();
    let executor = Executor::new(Arc::clone(log.executor().database()))
        .with_clock(Arc::new(move || ticks.fetch_add(100, Ordering::SeqCst)));
    for _ in 0..3 {
        executor
            .execute(Command::CreateActivity(restock("K-1")))
            .unwrap();
    }

    let req = ViewActivitiesRequest {
        start_time: Some("150".into()),
        end_time: Some("300".into()),
        ..Default::default()
    };
    let stamps: Vec<i64> = view(&executor, req).iter().map(|a| a.timestamp).collect();
    assert_eq!(stamps, vec![200]);

    let rfc3339 = ViewActivitiesRequest {
        start_time: Some("1970-01-01T00:00:00.200Z".into()),
        ..Default::default()
    };
    let stamps: Vec<i64> = view(&executor, rfc3339).iter().map(|a| a.timestamp).collect();
    assert_eq!(stamps, vec![200, 300]);
}

#[test]
fn test_repeated_queries_are_identical() {
    let log = seeded();
    let req = ViewActivitiesRequest {
        resource_types: vec!["locker".into()],
        ..Default::default()
    };
    assert_eq!(log.view_activities(&req).unwrap(), log.view_activities(&req).unwrap());
}

#[test]
fn test_malformed_filters_are_rejected() {
    let log = seeded();
    let inverted = ViewActivitiesRequest {
        start_time: Some("500".into()),
        end_time: Some("100".into()),
        ..Default::default()
    };
    let bad_id = ViewActivitiesRequest {
        ids: vec!["-1".into()],
        ..Default::default()
    };
    for req in [inverted, bad_id] {
        assert!(matches!(
            log.view_activities(&req),
            Err(Error::InvalidQuery { .. })
        ));
    }
}

#[test]
fn test_json_request_round_trip_through_executor() {
    let log = seeded();
    let cmd: Command =
        serde_json::from_str(r#"{"CountActivities":{"kioskIds":["K-3"],"actorTypes":["vendor"]}}"#)
            .unwrap();
    assert_eq!(log.executor().execute(cmd).unwrap(), Output::Uint(2));
}
