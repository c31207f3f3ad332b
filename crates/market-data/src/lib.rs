//! Crypto Sentry Market Data Crate
//!
//! Price-series acquisition for the Crypto Sentry monitor: fetches daily
//! price history for one instrument, derives trend and range figures, and
//! degrades to a synthetic series whenever the live feed is unavailable.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | RefreshScheduler |  (fixed interval, cancellable)
//! +------------------+
//!          |
//!          v
//! +------------------+     +----------------------+
//! | PriceSeriesStore | --> | PriceHistoryProvider |  (CoinGecko, ...)
//! +------------------+     +----------------------+
//!          |                          |
//!          |   on error               v
//!          |<------------------ fallback::synthesize
//!          v
//! +------------------+
//! |  SeriesSnapshot  |  (series + DerivedMetrics + degraded flag)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`InstrumentId`] - Crypto pair identifier (`BTC-USD`)
//! - [`PricePoint`] / [`PriceSeries`] - Time-ordered observations
//! - [`DerivedMetrics`] - Current price, change, high/low, market cap
//! - [`PriceSeriesStore`] - Fetch, fallback and last-completed-wins cache
//! - [`RefreshScheduler`] - Periodic re-fetch driver

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod scheduler;
pub mod series;

pub use config::PriceFeedConfig;
pub use errors::MarketDataError;
pub use models::{
    derive_metrics, Currency, DerivedMetrics, EpochMillis, InstrumentId, PricePoint, PriceSeries,
    CIRCULATING_SUPPLY, HIGH_LOW_WINDOW_POINTS,
};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::PriceHistoryProvider;
pub use scheduler::RefreshScheduler;
pub use series::{FallbackShape, FetchOutcome, PriceSeriesStore, SeriesSnapshot};
