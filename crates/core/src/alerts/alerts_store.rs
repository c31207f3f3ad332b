use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use super::alerts_model::{Alert, NewAlert};
use super::alerts_traits::AlertStoreTrait;
use crate::errors::Result;

#[derive(Debug, Default)]
struct AlertState {
    alerts: Vec<Alert>,
    refresh_token: u64,
}

/// In-memory alert collection for the current session.
///
/// Owned explicitly and shared by `Arc` with whoever needs it; there is no
/// global instance. The refresh token changes exactly once per successful
/// creation, so consumers can compare it against a previously seen value
/// to know when to re-read [`list`](AlertStoreTrait::list).
#[derive(Debug, Default)]
pub struct AlertStore {
    state: RwLock<AlertState>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, AlertState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Alert store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AlertState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Alert store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn len(&self) -> usize {
        self.read_state().alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().alerts.is_empty()
    }

    /// Alerts whose symbol matches, in insertion order.
    pub fn list_for_symbol(&self, symbol: &str) -> Vec<Alert> {
        self.read_state()
            .alerts
            .iter()
            .filter(|a| a.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
            .collect()
    }
}

impl AlertStoreTrait for AlertStore {
    fn list(&self) -> Vec<Alert> {
        self.read_state().alerts.clone()
    }

    fn get(&self, alert_id: &str) -> Option<Alert> {
        self.read_state()
            .alerts
            .iter()
            .find(|a| a.id == alert_id)
            .cloned()
    }

    fn create(&self, new_alert: NewAlert) -> Result<Alert> {
        new_alert.validate()?;

        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            symbol: new_alert.symbol.trim().to_string(),
            alert_type: new_alert.alert_type,
            target_price: new_alert.target_price,
            is_active: true,
            created_at: Utc::now(),
        };

        let mut state = self.write_state();
        state.alerts.push(alert.clone());
        state.refresh_token += 1;
        info!(
            "Created {} alert {} for {} (refresh token {})",
            alert.alert_type, alert.id, alert.symbol, state.refresh_token
        );

        Ok(alert)
    }

    fn delete(&self, alert_id: &str) -> bool {
        let mut state = self.write_state();
        let before = state.alerts.len();
        state.alerts.retain(|a| a.id != alert_id);
        let removed = state.alerts.len() != before;
        if removed {
            info!("Deleted alert {}", alert_id);
        }
        removed
    }

    fn refresh_token(&self) -> u64 {
        self.read_state().refresh_token
    }
}
