//! Remote persistence backends for alert drafts.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use super::alerts_model::{AlertType, NewAlert};
use super::alerts_traits::AlertPersistence;
use crate::api_client::ApiClient;
use crate::config::AlertServiceConfig;
use crate::credentials::BearerToken;
use crate::errors::Result;

const ALERTS_PATH: &str = "/alerts/";

/// Wire body of `POST /alerts/`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
struct CreateAlertRequest<'a> {
    crypto_symbol: &'a str,
    alert_type: AlertType,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_value: Option<Decimal>,
    is_active: bool,
}

impl<'a> From<&'a NewAlert> for CreateAlertRequest<'a> {
    fn from(draft: &'a NewAlert) -> Self {
        Self {
            crypto_symbol: draft.symbol.trim(),
            alert_type: draft.alert_type,
            threshold_value: draft.target_price,
            is_active: true,
        }
    }
}

/// Persists drafts through the backend alert API.
#[derive(Clone, Debug)]
pub struct HttpAlertPersistence {
    api: ApiClient,
}

impl HttpAlertPersistence {
    pub fn new(config: &AlertServiceConfig, token: Option<&BearerToken>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config, token)?,
        })
    }
}

#[async_trait]
impl AlertPersistence for HttpAlertPersistence {
    async fn persist(&self, new_alert: &NewAlert) -> Result<()> {
        let body = CreateAlertRequest::from(new_alert);
        self.api.post(ALERTS_PATH, &body).await
    }
}

/// Stand-in backend that waits a fixed latency and acknowledges.
#[derive(Clone, Debug)]
pub struct SimulatedAlertPersistence {
    latency: Duration,
}

impl SimulatedAlertPersistence {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn from_config(config: &AlertServiceConfig) -> Self {
        Self::new(config.simulated_latency)
    }
}

impl Default for SimulatedAlertPersistence {
    fn default() -> Self {
        Self::from_config(&AlertServiceConfig::default())
    }
}

#[async_trait]
impl AlertPersistence for SimulatedAlertPersistence {
    async fn persist(&self, new_alert: &NewAlert) -> Result<()> {
        debug!(
            "Simulating persistence of {} alert for {} ({:?})",
            new_alert.alert_type, new_alert.symbol, self.latency
        );
        tokio::time::sleep(self.latency).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_request_body_uses_backend_field_names() {
        let draft = NewAlert::new(" BTC-USD ", AlertType::PriceTarget, Some(dec!(50000)));
        let body = serde_json::to_value(CreateAlertRequest::from(&draft)).unwrap();
        assert_eq!(
            body,
            json!({
                "crypto_symbol": "BTC-USD",
                "alert_type": "PRICE_TARGET",
                "threshold_value": 50000.0,
                "is_active": true,
            })
        );
    }

    #[test]
    fn test_request_body_omits_missing_threshold() {
        let draft = NewAlert::new("ETH-USD", AlertType::Anomaly, None);
        let body = serde_json::to_value(CreateAlertRequest::from(&draft)).unwrap();
        assert!(body.get("threshold_value").is_none());
        assert_eq!(body["alert_type"], "ANOMALY");
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_backend_waits_configured_latency() {
        let backend = SimulatedAlertPersistence::new(Duration::from_millis(1000));
        let draft = NewAlert::new("ETH-USD", AlertType::TrendUp, None);

        let started = tokio::time::Instant::now();
        backend.persist(&draft).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
