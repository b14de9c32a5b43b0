//! Shared fixtures.

use kiosklog::{CreateActivityRequest, ViewActivitiesRequest};

/// A valid vendor activity at `kiosk`
pub fn restock(kiosk: &str) -> CreateActivityRequest {
    CreateActivityRequest {
        actor_type: "vendor".into(),
        name: "Ada".into(),
        telephone: "555-0100".into(),
        email: "ada@example.com".into(),
        activity_type: "restock".into(),
        kiosk_id: kiosk.into(),
        latitude: "52.52".into(),
        longitude: "13.405".into(),
        kiosk_details: "lobby".into(),
        device_type: "tablet".into(),
        id1: "dev-1".into(),
        ..Default::default()
    }
}

/// Flatten `(owner, type, id, details)` tuples into the request layout
pub fn resources(tuples: &[(&str, &str, &str, &str)]) -> Vec<String> {
    tuples
        .iter()
        .flat_map(|(o, t, i, d)| [*o, *t, *i, *d])
        .map(String::from)
        .collect()
}

/// A query with no constraints
pub fn everything() -> ViewActivitiesRequest {
    ViewActivitiesRequest::default()
}
