//! Price feed configuration.

use std::time::Duration;

use crate::models::InstrumentId;
use crate::provider::coingecko::DEFAULT_BASE_URL;
use crate::series::FallbackShape;

/// Default instrument tracked by the feed.
pub const DEFAULT_INSTRUMENT: &str = "BTC-USD";

/// Default history window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Longest history window served, in days. Longer requests are truncated.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Default re-fetch interval.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Default HTTP timeout for price-history requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one price feed.
#[derive(Clone, Debug)]
pub struct PriceFeedConfig {
    pub instrument: InstrumentId,
    pub window_days: u32,
    pub refresh_interval: Duration,
    /// API root of the price-history endpoint
    pub base_url: String,
    pub request_timeout: Duration,
    /// Shape of the synthetic series served in degraded mode
    pub fallback: FallbackShape,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            instrument: InstrumentId::new("BTC", "USD"),
            window_days: DEFAULT_WINDOW_DAYS,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            fallback: FallbackShape::default(),
        }
    }
}

impl PriceFeedConfig {
    pub fn with_instrument(mut self, instrument: InstrumentId) -> Self {
        self.instrument = instrument;
        self
    }

    pub fn with_window_days(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackShape) -> Self {
        self.fallback = fallback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PriceFeedConfig::default();
        assert_eq!(config.instrument.to_string(), DEFAULT_INSTRUMENT);
        assert_eq!(config.window_days, 7);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.base_url, "https://api.coingecko.com/api/v3");
    }

    #[test]
    fn test_builder_overrides() {
        let config = PriceFeedConfig::default()
            .with_instrument(InstrumentId::new("ETH", "USD"))
            .with_window_days(30)
            .with_refresh_interval(Duration::from_secs(5));
        assert_eq!(config.instrument.to_string(), "ETH-USD");
        assert_eq!(config.window_days, 30);
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
    }
}
