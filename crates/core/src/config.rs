//! Settings for the remote services the alert engine talks to.

use std::time::Duration;

/// Default API root of the alert and anomaly services.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Latency of the simulated persistence backend.
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_secs(1);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct AlertServiceConfig {
    pub api_base_url: String,
    pub simulated_latency: Duration,
    pub request_timeout: Duration,
}

impl Default for AlertServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AlertServiceConfig {
    /// `api_base_url` without a trailing slash, ready for path joining.
    pub fn api_root(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
