//! Tier 1: append semantics.

use crate::test_utils::*;
use kiosklog::{ActorType, Error, KioskLog};

#[test]
fn test_ids_are_sequential_from_zero() {
    let log = KioskLog::cache().unwrap();
    for expected in 0..10u64 {
        assert_eq!(log.create_activity(restock("K-1")).unwrap().id, expected);
    }
    assert_eq!(log.activity_len().unwrap(), 10);
}

#[test]
fn test_created_activity_carries_every_field() {
    let log = KioskLog::cache().unwrap();
    let mut req = restock("K-9");
    req.remark = "weekly".into();
    req.id4 = "slot-4".into();
    req.resources = resources(&[("alice", "locker", "L-1", "top")]);

    let a = log.create_activity(req).unwrap();
    assert_eq!(a.actor.actor_type, ActorType::Vendor);
    assert_eq!(a.actor.telephone, "555-0100");
    assert_eq!(a.kiosk.id, "K-9");
    assert_eq!(a.kiosk.details, "lobby");
    assert_eq!(a.kiosk.longitude, 13.405);
    assert_eq!(a.device.id4, "slot-4");
    assert_eq!(a.resources[0].resource_type, "locker");
    assert_eq!(a.remark, "weekly");

    assert_eq!(log.get_activity(a.id).unwrap(), Some(a));
}

#[test]
fn test_actor_type_is_case_insensitive() {
    let log = KioskLog::cache().unwrap();
    let mut req = restock("K-1");
    req.actor_type = "Business".into();
    let a = log.create_activity(req).unwrap();
    assert_eq!(a.actor.actor_type, ActorType::Business);
}

#[test]
fn test_rejected_inputs_leave_log_unchanged() {
    let log = KioskLog::cache().unwrap();
    log.create_activity(restock("K-1")).unwrap();

    let mut bad_lat = restock("K-1");
    bad_lat.latitude = "north".into();
    let mut bad_lon = restock("K-1");
    bad_lon.longitude = "".into();
    let mut no_name = restock("K-1");
    no_name.name = "".into();
    let mut bad_actor = restock("K-1");
    bad_actor.actor_type = "robot".into();
    let mut partial = restock("K-1");
    partial.resources = vec!["alice".into()];

    assert!(matches!(
        log.create_activity(bad_lat),
        Err(Error::InvalidCoordinate { .. })
    ));
    assert!(matches!(
        log.create_activity(bad_lon),
        Err(Error::InvalidCoordinate { .. })
    ));
    for req in [no_name, bad_actor, partial] {
        assert!(matches!(
            log.create_activity(req),
            Err(Error::InvalidRecord { .. })
        ));
    }

    assert_eq!(log.activity_len().unwrap(), 1);
    assert_eq!(log.create_activity(restock("K-1")).unwrap().id, 1);
}

#[test]
fn test_timestamps_never_decrease() {
    let log = KioskLog::cache().unwrap();
    let stamps: Vec<i64> = (0..20)
        .map(|_| log.create_activity(restock("K-1")).unwrap().timestamp)
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}
