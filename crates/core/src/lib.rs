//! Crypto Sentry Core - alert state engine and remote service clients.
//!
//! This crate owns the session's alert collection and the pipeline that
//! validates, persists and records new alerts. Price data lives in
//! `cryptosentry-market-data`, re-exported here as [`market_data`]; alerts
//! and prices are correlated only by symbol at read time.

pub mod alerts;
pub mod anomaly;
pub mod api_client;
pub mod config;
pub mod credentials;
pub mod errors;

pub use cryptosentry_market_data as market_data;

pub use alerts::{
    Alert, AlertStore, AlertStoreTrait, AlertSubmissionPipeline, AlertType, NewAlert,
    SubmissionError, SubmissionErrorKind,
};
pub use config::AlertServiceConfig;
pub use credentials::BearerToken;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
