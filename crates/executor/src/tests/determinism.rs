//! Determinism tests: verify same input produces same output.
//!
//! The same Command executed on the same database state produces the same
//! Output.

use std::sync::Arc;

use kiosklog_engine::Database;

use super::vendor_request;
use crate::{Command, Executor, ViewActivitiesRequest};

fn seeded_executor() -> Executor {
    let executor = Executor::new(Database::cache().unwrap()).with_clock(Arc::new(|| 1_000i64));
    for kiosk in ["K-1", "K-2", "K-1"] {
        executor
            .execute(Command::CreateActivity(vendor_request(kiosk)))
            .unwrap();
    }
    executor
}

#[test]
fn test_ping_determinism() {
    let executor = seeded_executor();
    let first = executor.execute(Command::Ping).unwrap();
    for _ in 0..5 {
        assert_eq!(executor.execute(Command::Ping).unwrap(), first);
    }
}

#[test]
fn test_view_determinism() {
    let executor = seeded_executor();
    let req = ViewActivitiesRequest {
        kiosk_ids: vec!["K-1".into()],
        ..Default::default()
    };
    let first = executor.execute(Command::ViewActivities(req.clone())).unwrap();
    let second = executor.execute(Command::ViewActivities(req)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_same_commands_same_outputs_across_databases() {
    let a = seeded_executor();
    let b = seeded_executor();
    for cmd in [
        Command::ActivityLen,
        Command::GetActivity { id: 2 },
        Command::ViewActivities(ViewActivitiesRequest::default()),
    ] {
        assert_eq!(a.execute(cmd.clone()).unwrap(), b.execute(cmd).unwrap());
    }
}
