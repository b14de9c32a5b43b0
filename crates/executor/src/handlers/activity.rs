//! Activity log command handlers.
//!
//! Request arguments are parsed in full before the store is touched, so a
//! malformed request never reaches the ledger.

use kiosklog_engine::{ActivityStore, QueryExecutor};

use crate::types::{CreateActivityRequest, ViewActivitiesRequest};
use crate::{Output, Result};

/// Handle CreateActivity command.
pub fn create_activity(store: &ActivityStore, req: CreateActivityRequest) -> Result<Output> {
    let draft = req.into_draft()?;
    Ok(Output::Activity(store.append(draft)?))
}

/// Handle ViewActivities command.
pub fn view_activities(query: &QueryExecutor, req: &ViewActivitiesRequest) -> Result<Output> {
    let spec = req.to_query_spec()?;
    Ok(Output::Activities(query.run(&spec)?))
}

/// Handle CountActivities command.
pub fn count_activities(query: &QueryExecutor, req: &ViewActivitiesRequest) -> Result<Output> {
    let spec = req.to_query_spec()?;
    Ok(Output::Uint(query.count(&spec)?))
}

/// Handle GetActivity command.
pub fn get_activity(store: &ActivityStore, id: u64) -> Result<Output> {
    Ok(Output::MaybeActivity(store.get(id)?))
}

/// Handle ActivityLen command.
pub fn activity_len(store: &ActivityStore) -> Result<Output> {
    Ok(Output::Uint(store.len()?))
}
