//! Core error types for the Crypto Sentry engine.
//!
//! Every failure in this crate is either surfaced synchronously as a typed
//! error or recovered locally. None is fatal to the process.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the alert engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A remote service (alert persistence, anomaly scoring) failed.
    #[error("Remote call failed: {0}")]
    RemoteFailure(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(String),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err.to_string()))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RemoteFailure(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::RemoteFailure(format!("Unreadable response: {}", err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err: Error = ValidationError::MissingField("targetPrice".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Input validation failed: Required field 'targetPrice' is missing"
        );
    }

    #[test]
    fn test_into_string() {
        let message: String = Error::RemoteFailure("HTTP 502".to_string()).into();
        assert_eq!(message, "Remote call failed: HTTP 502");
    }
}
