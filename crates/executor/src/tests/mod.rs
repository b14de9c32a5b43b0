//! Test modules for the executor crate.

pub mod determinism;

use crate::CreateActivityRequest;

/// A request that passes validation, recorded at `kiosk`
pub(crate) fn vendor_request(kiosk: &str) -> CreateActivityRequest {
    CreateActivityRequest {
        actor_type: "vendor".into(),
        name: "Ada".into(),
        telephone: "555-0100".into(),
        email: "ada@example.com".into(),
        activity_type: "restock".into(),
        kiosk_id: kiosk.into(),
        latitude: "52.52".into(),
        longitude: "13.405".into(),
        device_type: "tablet".into(),
        id1: "dev-1".into(),
        ..Default::default()
    }
}
