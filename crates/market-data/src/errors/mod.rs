//! Error types for the market data crate.
//!
//! Every variant here is recoverable: [`PriceSeriesStore`](crate::PriceSeriesStore)
//! turns any of them into a synthesized fallback series and a `degraded` flag.
//! They still carry enough detail to be logged.

use thiserror::Error;

/// Errors that can occur while acquiring a price series.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The instrument string could not be parsed (expected `BASE-QUOTE`).
    #[error("Invalid instrument: {0}")]
    InvalidInstrument(String),

    /// The provider answered with a non-2xx status.
    #[error("HTTP {status} from {provider}")]
    HttpStatus {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The provider answered 2xx but the body was not the expected shape.
    #[error("Malformed payload from {provider}: {message}")]
    MalformedPayload {
        /// The provider that returned the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true when the endpoint was unreachable or answered non-2xx.
    ///
    /// Malformed payloads and invalid instruments are not network failures,
    /// although they also lead to fallback data.
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::HttpStatus { .. } | Self::Network(_))
    }
}
