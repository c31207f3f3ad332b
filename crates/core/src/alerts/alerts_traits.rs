use async_trait::async_trait;

use crate::alerts::alerts_model::{Alert, NewAlert};
use crate::errors::Result;

/// Trait for the session's alert collection.
///
/// All mutations are synchronous and atomic: a caller never observes a
/// half-applied change.
pub trait AlertStoreTrait: Send + Sync {
    /// Snapshot of the collection in insertion order.
    fn list(&self) -> Vec<Alert>;
    fn get(&self, alert_id: &str) -> Option<Alert>;
    /// Validates, assigns id and timestamp, appends, and bumps the refresh token.
    fn create(&self, new_alert: NewAlert) -> Result<Alert>;
    /// Removes the alert if present. Returns whether anything was removed.
    fn delete(&self, alert_id: &str) -> bool;
    fn refresh_token(&self) -> u64;
}

/// Trait for the remote alert-persistence service.
#[async_trait]
pub trait AlertPersistence: Send + Sync {
    /// Persist a validated draft. Any error is a remote failure.
    async fn persist(&self, new_alert: &NewAlert) -> Result<()>;
}

/// Caller-supplied notification invoked after each successful creation.
pub trait AlertCreatedHook: Send + Sync {
    fn on_alert_created(&self, alert: &Alert);
}

impl<F> AlertCreatedHook for F
where
    F: Fn(&Alert) + Send + Sync,
{
    fn on_alert_created(&self, alert: &Alert) {
        self(alert)
    }
}
