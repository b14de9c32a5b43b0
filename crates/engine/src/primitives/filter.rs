//! Filter predicate engine
//!
//! `matches(record, spec)` is the conjunction of every active predicate in
//! the spec. Inactive predicates (empty sets, open time range) pass.
//!
//! | Predicate | Passes when |
//! |-----------|-------------|
//! | scalar / enum set | the record's value is in the set |
//! | resource filter | one resource entry satisfies every active sub-predicate |
//! | time range | `start <= timestamp < end` |

use kiosklog_core::{Activity, QuerySpec, Resource, ResourceFilter};
use std::collections::BTreeSet;

#[inline]
fn member(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

fn resource_matches(resource: &Resource, filter: &ResourceFilter) -> bool {
    member(&filter.owners, &resource.owner)
        && member(&filter.types, &resource.resource_type)
        && member(&filter.ids, &resource.id)
}

/// True if `record` satisfies every active predicate of `spec`
pub fn matches(record: &Activity, spec: &QuerySpec) -> bool {
    if !spec.ids.is_empty() && !spec.ids.contains(&record.id) {
        return false;
    }
    if !spec.actor_types.is_empty() && !spec.actor_types.contains(&record.actor.actor_type) {
        return false;
    }

    let scalars = member(&spec.names, &record.actor.name)
        && member(&spec.telephones, &record.actor.telephone)
        && member(&spec.emails, &record.actor.email)
        && member(&spec.activity_types, &record.activity_type)
        && member(&spec.kiosk_ids, &record.kiosk.id)
        && member(&spec.device_types, &record.device.device_type)
        && member(&spec.device_id1s, &record.device.id1)
        && member(&spec.device_id2s, &record.device.id2)
        && member(&spec.device_id3s, &record.device.id3)
        && member(&spec.device_id4s, &record.device.id4);
    if !scalars {
        return false;
    }

    if spec.resources.is_active()
        && !record
            .resources
            .iter()
            .any(|r| resource_matches(r, &spec.resources))
    {
        return false;
    }

    spec.time_range.contains(record.timestamp)
}
