//! CoinGecko price-history provider.
//!
//! Fetches daily prices from the public `market_chart` endpoint:
//! `GET {base}/coins/{coin_id}/market_chart?vs_currency=usd&days=7&interval=daily`.
//! No API key is required for the public tier.

mod models;

pub use models::{parse_market_chart, MarketChartResponse};

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::{InstrumentId, PriceSeries};
use crate::provider::PriceHistoryProvider;

/// Default public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Provider ID constant
pub(crate) const PROVIDER_ID: &str = "COINGECKO";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tickers whose CoinGecko id is not simply the lower-cased ticker.
const COIN_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("ADA", "cardano"),
    ("DOT", "polkadot"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("DOGE", "dogecoin"),
    ("AVAX", "avalanche-2"),
];

/// CoinGecko market-chart client.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    /// Create a provider against the public API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Create a provider against a custom API root (proxies, test servers).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Map a ticker to its CoinGecko coin id.
    pub fn coin_id(base: &str) -> String {
        COIN_IDS
            .iter()
            .find(|(ticker, _)| ticker.eq_ignore_ascii_case(base))
            .map(|(_, id)| id.to_string())
            .unwrap_or_else(|| base.to_ascii_lowercase())
    }

    fn market_chart_url(&self, instrument: &InstrumentId) -> String {
        format!(
            "{}/coins/{}/market_chart",
            self.base_url,
            urlencoding::encode(&Self::coin_id(&instrument.base))
        )
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceHistoryProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_price_history(
        &self,
        instrument: &InstrumentId,
        window_days: u32,
    ) -> Result<PriceSeries, MarketDataError> {
        let url = self.market_chart_url(instrument);
        let vs_currency = instrument.quote.to_ascii_lowercase();
        let days = window_days.to_string();

        debug!("CoinGecko request: {} ({} days, {})", url, days, vs_currency);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", vs_currency.as_str()),
                ("days", days.as_str()),
                ("interval", "daily"),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_market_chart(&body)
    }
}
