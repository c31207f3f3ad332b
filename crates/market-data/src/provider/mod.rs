//! Price-history provider abstraction and implementations.
//!
//! - The `PriceHistoryProvider` trait every source implements
//! - `coingecko` - the public CoinGecko market-chart endpoint

mod traits;

pub mod coingecko;

pub use traits::PriceHistoryProvider;
