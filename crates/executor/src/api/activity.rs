//! Activity log operations.

use super::KioskLog;
use crate::types::{CreateActivityRequest, ViewActivitiesRequest};
use crate::{Command, Error, Output, Result};
use kiosklog_core::Activity;

impl KioskLog {
    /// Record a new activity.
    ///
    /// Returns the stored activity with its assigned id and timestamp.
    ///
    /// # Errors
    /// - `InvalidRecord` / `InvalidCoordinate` for rejected input
    /// - `PermissionDenied` unless the caller is an admin or vendor
    /// - `AccessDenied` on a read-only handle
    pub fn create_activity(&self, req: CreateActivityRequest) -> Result<Activity> {
        match self.executor.execute(Command::CreateActivity(req))? {
            Output::Activity(activity) => Ok(activity),
            _ => Err(Error::Internal {
                reason: "Unexpected output for CreateActivity".into(),
            }),
        }
    }

    /// Every activity matching `req`, in log order.
    pub fn view_activities(&self, req: &ViewActivitiesRequest) -> Result<Vec<Activity>> {
        match self.executor.execute(Command::ViewActivities(req.clone()))? {
            Output::Activities(activities) => Ok(activities),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ViewActivities".into(),
            }),
        }
    }

    /// Number of activities matching `req`.
    pub fn count_activities(&self, req: &ViewActivitiesRequest) -> Result<u64> {
        match self.executor.execute(Command::CountActivities(req.clone()))? {
            Output::Uint(n) => Ok(n),
            _ => Err(Error::Internal {
                reason: "Unexpected output for CountActivities".into(),
            }),
        }
    }

    /// Activity with the given id, if committed.
    pub fn get_activity(&self, id: u64) -> Result<Option<Activity>> {
        match self.executor.execute(Command::GetActivity { id })? {
            Output::MaybeActivity(activity) => Ok(activity),
            _ => Err(Error::Internal {
                reason: "Unexpected output for GetActivity".into(),
            }),
        }
    }

    /// Number of activities in the log.
    pub fn activity_len(&self) -> Result<u64> {
        match self.executor.execute(Command::ActivityLen)? {
            Output::Uint(n) => Ok(n),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ActivityLen".into(),
            }),
        }
    }
}
