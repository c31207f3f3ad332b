//! Market data models
//!
//! - `types` - Type aliases for common identifiers (Currency, EpochMillis)
//! - `instrument` - Canonical pair identity (InstrumentId)
//! - `price` - Price observations (PricePoint, PriceSeries)
//! - `metrics` - Figures derived from a series (DerivedMetrics)

mod instrument;
mod metrics;
mod price;
mod types;

pub use instrument::InstrumentId;
pub use metrics::{derive_metrics, DerivedMetrics, CIRCULATING_SUPPLY, HIGH_LOW_WINDOW_POINTS};
pub use price::{PricePoint, PriceSeries};
pub use types::{Currency, EpochMillis};
