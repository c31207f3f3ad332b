//! Alert-created hook implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use super::alerts_model::Alert;
use super::alerts_traits::AlertCreatedHook;

/// Hook for contexts that don't care about creations.
#[derive(Clone, Debug, Default)]
pub struct NoOpAlertHook;

impl AlertCreatedHook for NoOpAlertHook {
    fn on_alert_created(&self, _alert: &Alert) {}
}

/// Collects every alert it is notified about. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingAlertHook {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingAlertHook {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        self.alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl AlertCreatedHook for RecordingAlertHook {
    fn on_alert_created(&self, alert: &Alert) {
        self.lock().push(alert.clone());
    }
}
