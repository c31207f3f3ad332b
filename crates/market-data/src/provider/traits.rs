//! Price-history provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{InstrumentId, PriceSeries};

/// A remote source of daily price history.
///
/// Implementations do the HTTP call and normalization only; fallback
/// handling lives in [`PriceSeriesStore`](crate::PriceSeriesStore).
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cryptosentry_market_data::provider::PriceHistoryProvider;
///
/// struct StaticProvider(PriceSeries);
///
/// #[async_trait]
/// impl PriceHistoryProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn get_price_history(
///         &self,
///         _instrument: &InstrumentId,
///         _window_days: u32,
///     ) -> Result<PriceSeries, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Constant identifier such as "COINGECKO", used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch `window_days` days of daily prices ending now.
    ///
    /// Points must be returned in source order (timestamp ascending).
    async fn get_price_history(
        &self,
        instrument: &InstrumentId,
        window_days: u32,
    ) -> Result<PriceSeries, MarketDataError>;
}
