//! Payloads of the anomaly-scoring service.

use serde::{Deserialize, Serialize};

/// Readiness report of the scoring service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyServiceStatus {
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub sequence_length: Option<u32>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub feature_count: Option<u32>,
}

impl AnomalyServiceStatus {
    pub fn is_ready(&self) -> bool {
        self.model_loaded && self.status.eq_ignore_ascii_case("ready")
    }
}

/// Result of scoring one instrument. Scores are opaque to this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAnalysis {
    #[serde(default)]
    pub is_anomaly: bool,
    #[serde(default)]
    pub anomaly_score: f64,
    #[serde(default)]
    pub reconstruction_error: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnomalyAnalysis {
    /// Whether the service reported an analysis failure in-band.
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }

    /// Score as a percentage, e.g. `83.4`.
    pub fn score_pct(&self) -> f64 {
        self.anomaly_score * 100.0
    }
}
