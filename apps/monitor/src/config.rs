use std::time::Duration;

use cryptosentry_core::config::{DEFAULT_API_BASE_URL, DEFAULT_SIMULATED_LATENCY};
use cryptosentry_core::{AlertServiceConfig, BearerToken};
use cryptosentry_market_data::config::MAX_WINDOW_DAYS;
use cryptosentry_market_data::{InstrumentId, PriceFeedConfig};

pub struct Config {
    pub price_feed: PriceFeedConfig,
    pub alert_service: AlertServiceConfig,
    pub api_token: Option<BearerToken>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = PriceFeedConfig::default();
        let instrument = lookup("CS_INSTRUMENT")
            .and_then(|s| InstrumentId::parse(&s).ok())
            .unwrap_or_else(|| defaults.instrument.clone());
        let window_days: u32 = lookup("CS_WINDOW_DAYS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|days| (1..=MAX_WINDOW_DAYS).contains(days))
            .unwrap_or(defaults.window_days);
        let refresh_interval = lookup("CS_REFRESH_INTERVAL_MS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.refresh_interval);

        let mut price_feed = defaults
            .with_instrument(instrument)
            .with_window_days(window_days)
            .with_refresh_interval(refresh_interval);
        if let Some(url) = lookup("CS_PRICE_API_URL").filter(|s| !s.trim().is_empty()) {
            price_feed = price_feed.with_base_url(url.trim());
        }

        let alert_service = AlertServiceConfig {
            api_base_url: lookup("CS_API_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
            ..Default::default()
        };

        let api_token = lookup("CS_API_TOKEN")
            .filter(|s| !s.trim().is_empty())
            .map(BearerToken::from);
        let log_format = lookup("CS_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Self {
            price_feed,
            alert_service,
            api_token,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_pairs(&[]);
        assert_eq!(config.price_feed.instrument.to_string(), "BTC-USD");
        assert_eq!(config.price_feed.window_days, 7);
        assert_eq!(config.price_feed.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.alert_service.api_base_url, "http://localhost:8000/api");
        assert!(config.api_token.is_none());
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("CS_INSTRUMENT", "eth-eur"),
            ("CS_WINDOW_DAYS", "30"),
            ("CS_REFRESH_INTERVAL_MS", "5000"),
            ("CS_PRICE_API_URL", "http://127.0.0.1:9000/v3"),
            ("CS_API_URL", "http://api.local/api"),
            ("CS_API_TOKEN", "tok"),
            ("CS_LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.price_feed.instrument.to_string(), "ETH-EUR");
        assert_eq!(config.price_feed.window_days, 30);
        assert_eq!(config.price_feed.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.price_feed.base_url, "http://127.0.0.1:9000/v3");
        assert_eq!(config.alert_service.api_base_url, "http://api.local/api");
        assert_eq!(config.api_token.unwrap().as_str(), "tok");
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = from_pairs(&[
            ("CS_INSTRUMENT", "bitcoin"),
            ("CS_WINDOW_DAYS", "0"),
            ("CS_REFRESH_INTERVAL_MS", "soon"),
            ("CS_API_TOKEN", "  "),
        ]);
        assert_eq!(config.price_feed.instrument.to_string(), "BTC-USD");
        assert_eq!(config.price_feed.window_days, 7);
        assert_eq!(config.price_feed.refresh_interval, Duration::from_secs(30));
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_window_days_above_limit_falls_back() {
        let config = from_pairs(&[("CS_WINDOW_DAYS", "100000000")]);
        assert_eq!(config.price_feed.window_days, 7);

        let config = from_pairs(&[("CS_WINDOW_DAYS", "3650")]);
        assert_eq!(config.price_feed.window_days, MAX_WINDOW_DAYS);
    }
}
