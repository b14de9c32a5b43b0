//! Request types for commands.
//!
//! Both requests use the camelCase field names of the kiosk ledger API
//! and default every omitted field to empty, so a caller only sends what it
//! needs. Scalar fields accept JSON strings or numbers.

use kiosklog_core::{
    parse_actor_type_set, parse_id_set, parse_time_bound, ActivityDraft, Device, QuerySpec,
    Resource, ResourceFilter, Result, TimeRange,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Lenient scalars
// =============================================================================

/// A JSON scalar accepted where text is expected
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

fn opt_text<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(d)?.map(Scalar::into_text))
}

fn text_list<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<Scalar>>::deserialize(d)?
        .unwrap_or_default()
        .into_iter()
        .map(Scalar::into_text)
        .collect())
}

// =============================================================================
// CreateActivity
// =============================================================================

/// Fields of a new activity.
///
/// `resources` is a flat list of `(owner, type, id, details)` tuples; its
/// length must be a multiple of four.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateActivityRequest {
    /// Actor role: `admin`, `user`, `vendor` or `business`
    #[serde(deserialize_with = "text")]
    pub actor_type: String,
    /// Actor display name
    #[serde(deserialize_with = "text")]
    pub name: String,
    /// Actor telephone
    #[serde(deserialize_with = "text")]
    pub telephone: String,
    /// Actor email
    #[serde(deserialize_with = "text")]
    pub email: String,
    /// Free-form activity kind, e.g. `restock`
    #[serde(deserialize_with = "text")]
    pub activity_type: String,
    /// Kiosk the activity happened at
    #[serde(deserialize_with = "text")]
    pub kiosk_id: String,
    /// Decimal degrees, as text or a JSON number
    #[serde(deserialize_with = "text")]
    pub latitude: String,
    /// Decimal degrees, as text or a JSON number
    #[serde(deserialize_with = "text")]
    pub longitude: String,
    /// Free-text kiosk description
    #[serde(deserialize_with = "text")]
    pub kiosk_details: String,
    /// Free-text note
    #[serde(deserialize_with = "text")]
    pub remark: String,
    /// Device kind, e.g. `tablet`
    #[serde(deserialize_with = "text")]
    pub device_type: String,
    /// Device identifier 1
    #[serde(deserialize_with = "text")]
    pub id1: String,
    /// Device identifier 2
    #[serde(deserialize_with = "text")]
    pub id2: String,
    /// Device identifier 3
    #[serde(deserialize_with = "text")]
    pub id3: String,
    /// Device identifier 4
    #[serde(deserialize_with = "text")]
    pub id4: String,
    /// Flat `(owner, type, id, details)` tuples
    #[serde(deserialize_with = "text_list")]
    pub resources: Vec<String>,
}

impl CreateActivityRequest {
    /// Convert to an unvalidated draft.
    ///
    /// # Errors
    /// `InvalidRecord` if `resources` is not a whole number of tuples.
    pub fn into_draft(self) -> Result<ActivityDraft> {
        let resources = Resource::from_flat(&self.resources)?;
        Ok(ActivityDraft {
            actor_type: self.actor_type,
            name: self.name,
            telephone: self.telephone,
            email: self.email,
            activity_type: self.activity_type,
            kiosk_id: self.kiosk_id,
            latitude: self.latitude,
            longitude: self.longitude,
            kiosk_details: self.kiosk_details,
            remark: self.remark,
            device: Device {
                device_type: self.device_type,
                id1: self.id1,
                id2: self.id2,
                id3: self.id3,
                id4: self.id4,
            },
            resources,
        })
    }
}

// =============================================================================
// ViewActivities
// =============================================================================

/// Filter arguments for a query.
///
/// Every list is a set of accepted values; an empty list places no
/// constraint. `startTime` is inclusive, `endTime` exclusive; both accept
/// epoch milliseconds or RFC 3339.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewActivitiesRequest {
    /// Activity ids
    #[serde(deserialize_with = "text_list")]
    pub ids: Vec<String>,
    /// Actor roles
    #[serde(deserialize_with = "text_list")]
    pub actor_types: Vec<String>,
    /// Actor names
    #[serde(deserialize_with = "text_list")]
    pub names: Vec<String>,
    /// Actor telephones
    #[serde(deserialize_with = "text_list")]
    pub telephones: Vec<String>,
    /// Actor emails
    #[serde(deserialize_with = "text_list")]
    pub emails: Vec<String>,
    /// Activity kinds
    #[serde(deserialize_with = "text_list")]
    pub activity_types: Vec<String>,
    /// Kiosk ids
    #[serde(deserialize_with = "text_list")]
    pub kiosk_ids: Vec<String>,
    /// Device kinds
    #[serde(deserialize_with = "text_list")]
    pub device_types: Vec<String>,
    /// Device identifier 1 values
    #[serde(deserialize_with = "text_list")]
    pub id1s: Vec<String>,
    /// Device identifier 2 values
    #[serde(deserialize_with = "text_list")]
    pub id2s: Vec<String>,
    /// Device identifier 3 values
    #[serde(deserialize_with = "text_list")]
    pub id3s: Vec<String>,
    /// Device identifier 4 values
    #[serde(deserialize_with = "text_list")]
    pub id4s: Vec<String>,
    /// Resource owners
    #[serde(deserialize_with = "text_list")]
    pub resource_owners: Vec<String>,
    /// Resource types
    #[serde(deserialize_with = "text_list")]
    pub resource_types: Vec<String>,
    /// Resource ids
    #[serde(deserialize_with = "text_list")]
    pub resource_ids: Vec<String>,
    /// Inclusive lower bound
    #[serde(deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Exclusive upper bound
    #[serde(deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

fn string_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}

impl ViewActivitiesRequest {
    /// Parse every argument into a query spec before any scan runs.
    ///
    /// # Errors
    /// `InvalidQuery` for an unparseable id or time bound, an unknown actor
    /// type, or a start time after the end time.
    pub fn to_query_spec(&self) -> Result<QuerySpec> {
        let start = self.start_time.as_deref().map(parse_time_bound).transpose()?.flatten();
        let end = self.end_time.as_deref().map(parse_time_bound).transpose()?.flatten();

        Ok(QuerySpec {
            ids: parse_id_set(&self.ids)?,
            actor_types: parse_actor_type_set(&self.actor_types)?,
            names: string_set(&self.names),
            telephones: string_set(&self.telephones),
            emails: string_set(&self.emails),
            activity_types: string_set(&self.activity_types),
            kiosk_ids: string_set(&self.kiosk_ids),
            device_types: string_set(&self.device_types),
            device_id1s: string_set(&self.id1s),
            device_id2s: string_set(&self.id2s),
            device_id3s: string_set(&self.id3s),
            device_id4s: string_set(&self.id4s),
            resources: ResourceFilter {
                owners: string_set(&self.resource_owners),
                types: string_set(&self.resource_types),
                ids: string_set(&self.resource_ids),
            },
            time_range: TimeRange::new(start, end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosklog_core::{ActorType, Error};

    #[test]
    fn test_create_request_accepts_numbers_and_omissions() {
        let req: CreateActivityRequest = serde_json::from_str(
            r#"{"actorType":"vendor","name":"Ada","activityType":"restock",
                "kioskId":42,"latitude":52.5,"longitude":"13.4"}"#,
        )
        .unwrap();
        assert_eq!(req.kiosk_id, "42");
        assert_eq!(req.latitude, "52.5");
        assert_eq!(req.telephone, "");
        assert!(req.resources.is_empty());
    }

    #[test]
    fn test_create_request_null_fields_are_empty() {
        let req: CreateActivityRequest =
            serde_json::from_str(r#"{"name":null,"resources":null}"#).unwrap();
        assert_eq!(req.name, "");
        assert!(req.resources.is_empty());
    }

    #[test]
    fn test_into_draft_splits_resource_tuples() {
        let req = CreateActivityRequest {
            device_type: "tablet".into(),
            id3: "x".into(),
            resources: ["alice", "locker", "L-1", "", "bob", "parcel", "P-2", "fragile"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..Default::default()
        };
        let draft = req.into_draft().unwrap();
        assert_eq!(draft.device.id3, "x");
        assert_eq!(draft.resources.len(), 2);
        assert_eq!(draft.resources[1].details, "fragile");
    }

    #[test]
    fn test_into_draft_rejects_partial_tuple() {
        let req = CreateActivityRequest {
            resources: vec!["alice".into(), "locker".into()],
            ..Default::default()
        };
        assert!(matches!(req.into_draft(), Err(Error::InvalidRecord { .. })));
    }

    #[test]
    fn test_empty_view_request_is_unconstrained() {
        let req: ViewActivitiesRequest = serde_json::from_str("{}").unwrap();
        assert!(req.to_query_spec().unwrap().is_unconstrained());
    }

    #[test]
    fn test_view_request_builds_spec() {
        let req: ViewActivitiesRequest = serde_json::from_str(
            r#"{"ids":[1,"2"],"actorTypes":["Admin"],"kioskIds":["K-1"],
                "resourceOwners":["alice"],"startTime":150,"endTime":"1970-01-01T00:00:00.300Z"}"#,
        )
        .unwrap();
        let spec = req.to_query_spec().unwrap();
        assert_eq!(spec.ids.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(spec.actor_types.contains(&ActorType::Admin));
        assert!(spec.kiosk_ids.contains("K-1"));
        assert!(spec.resources.owners.contains("alice"));
        assert_eq!(spec.time_range, TimeRange::new(Some(150), Some(300)).unwrap());
    }

    #[test]
    fn test_view_request_blank_time_is_open() {
        let req = ViewActivitiesRequest {
            start_time: Some("".into()),
            ..Default::default()
        };
        assert!(!req.to_query_spec().unwrap().time_range.is_active());
    }

    #[test]
    fn test_view_request_rejects_malformed_arguments() {
        let bad_id = ViewActivitiesRequest {
            ids: vec!["seven".into()],
            ..Default::default()
        };
        let bad_type = ViewActivitiesRequest {
            actor_types: vec!["robot".into()],
            ..Default::default()
        };
        let bad_time = ViewActivitiesRequest {
            start_time: Some("last tuesday".into()),
            ..Default::default()
        };
        let inverted = ViewActivitiesRequest {
            start_time: Some("300".into()),
            end_time: Some("100".into()),
            ..Default::default()
        };
        for req in [bad_id, bad_type, bad_time, inverted] {
            assert!(matches!(
                req.to_query_spec(),
                Err(Error::InvalidQuery { .. })
            ));
        }
    }
}
