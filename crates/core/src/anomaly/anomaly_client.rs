use cryptosentry_market_data::InstrumentId;
use log::debug;

use super::anomaly_model::{AnomalyAnalysis, AnomalyServiceStatus};
use crate::api_client::ApiClient;
use crate::config::AlertServiceConfig;
use crate::credentials::BearerToken;
use crate::errors::{Result, ValidationError};

const STATUS_PATH: &str = "/ai/status";
const ANALYZE_PATH: &str = "/ai/analyze";
const DEFAULT_QUOTE: &str = "USD";

/// Turns `BTC` into `BTC-USD`; symbols that already carry a quote are kept.
pub fn normalize_symbol(symbol: &str) -> Result<InstrumentId> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ValidationError::MissingField("symbol".to_string()).into());
    }
    let instrument = if symbol.contains('-') {
        InstrumentId::parse(symbol)
    } else {
        InstrumentId::parse(&format!("{}-{}", symbol, DEFAULT_QUOTE))
    };
    instrument.map_err(|e| ValidationError::InvalidInput(e.to_string()).into())
}

/// Client for the remote anomaly-scoring service.
#[derive(Clone, Debug)]
pub struct AnomalyClient {
    api: ApiClient,
}

impl AnomalyClient {
    pub fn new(config: &AlertServiceConfig, token: Option<&BearerToken>) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config, token)?,
        })
    }

    pub async fn status(&self) -> Result<AnomalyServiceStatus> {
        self.api.get(STATUS_PATH).await
    }

    pub async fn analyze(&self, symbol: &str) -> Result<AnomalyAnalysis> {
        let instrument = normalize_symbol(symbol)?;
        debug!("Requesting anomaly analysis for {}", instrument);
        self.api.get(&analyze_path(&instrument)).await
    }
}

fn analyze_path(instrument: &InstrumentId) -> String {
    format!(
        "{}/{}",
        ANALYZE_PATH,
        urlencoding::encode(&instrument.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("btc").unwrap().to_string(), "BTC-USD");
        assert_eq!(normalize_symbol(" eth-eur ").unwrap().to_string(), "ETH-EUR");
        assert!(matches!(
            normalize_symbol(""),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
        assert!(matches!(
            normalize_symbol("BTC-"),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_analyze_path() {
        let btc = InstrumentId::new("btc", "usd");
        assert_eq!(analyze_path(&btc), "/ai/analyze/BTC-USD");
        let client = AnomalyClient::new(&AlertServiceConfig::default(), None).unwrap();
        assert_eq!(
            client.api.url(&analyze_path(&btc)),
            "http://localhost:8000/api/ai/analyze/BTC-USD"
        );
    }
}
