//! CoinGecko API response models.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{PricePoint, PriceSeries};

use super::PROVIDER_ID;

/// Response body of `/coins/{id}/market_chart`.
///
/// Only `prices` is used. `market_caps` and `total_volumes` exist in the
/// payload with the same `[timestamp, value]` shape.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
}

fn malformed(message: impl Into<String>) -> MarketDataError {
    MarketDataError::MalformedPayload {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

impl MarketChartResponse {
    /// Maps each `[timestamp, price]` pair into a [`PricePoint`].
    pub fn into_series(self) -> Result<PriceSeries, MarketDataError> {
        let points = self
            .prices
            .into_iter()
            .map(|(timestamp, price)| {
                if !timestamp.is_finite() || timestamp < 0.0 {
                    return Err(malformed(format!("invalid timestamp {}", timestamp)));
                }
                if !price.is_finite() || price < 0.0 {
                    return Err(malformed(format!("invalid price {}", price)));
                }
                let price = Decimal::try_from(price)
                    .map_err(|e| malformed(format!("price {} not representable: {}", price, e)))?;
                Ok(PricePoint::new(timestamp as i64, price))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::new(points))
    }
}

/// Parses a raw market-chart body into a series.
pub fn parse_market_chart(body: &str) -> Result<PriceSeries, MarketDataError> {
    let response: MarketChartResponse =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    response.into_series()
}
