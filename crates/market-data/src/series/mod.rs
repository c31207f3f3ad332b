//! Price series ownership: acquisition, caching and degraded-mode fallback.

mod fallback;
mod store;

pub use fallback::{synthesize, synthesize_with_rng, FallbackShape, DAY_MILLIS};
pub use store::{FetchOutcome, PriceSeriesStore, SeriesSnapshot};
