//! Anomaly module - client and payloads of the remote scoring service.

mod anomaly_client;
mod anomaly_model;

pub use anomaly_client::{normalize_symbol, AnomalyClient};
pub use anomaly_model::{AnomalyAnalysis, AnomalyServiceStatus};
