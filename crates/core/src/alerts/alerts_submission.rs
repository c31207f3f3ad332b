use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use thiserror::Error;

use super::alerts_model::{Alert, AlertType, NewAlert};
use super::alerts_traits::{AlertCreatedHook, AlertPersistence, AlertStoreTrait};
use crate::errors::{Error, ValidationError};

/// Which stage of a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionErrorKind {
    /// The draft was rejected locally; nothing was sent.
    Validation,
    /// The persistence service failed; the store was not touched.
    RemoteFailure,
}

impl fmt::Display for SubmissionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionErrorKind::Validation => f.write_str("validation"),
            SubmissionErrorKind::RemoteFailure => f.write_str("remote failure"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Alert submission failed ({kind}): {message}")]
pub struct SubmissionError {
    pub kind: SubmissionErrorKind,
    pub message: String,
}

impl SubmissionError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: SubmissionErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            kind: SubmissionErrorKind::RemoteFailure,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == SubmissionErrorKind::Validation
    }
}

impl From<ValidationError> for SubmissionError {
    fn from(err: ValidationError) -> Self {
        SubmissionError::validation(err.to_string())
    }
}

impl From<Error> for SubmissionError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(e) => e.into(),
            Error::RemoteFailure(msg) => SubmissionError::remote(msg),
            Error::Unexpected(msg) => SubmissionError::remote(msg),
        }
    }
}

/// Parses the raw target-price field of a form.
///
/// Blank input means "no target". Anything else must be a decimal number.
pub fn parse_target_price(raw: Option<&str>) -> Result<Option<Decimal>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map(Some)
        .map_err(|_| ValidationError::DecimalParse(format!("'{}' is not a number", raw)))
}

/// Validates, persists remotely, then records an alert locally.
///
/// Each call is independent: identical submissions create distinct alerts
/// and failures are never retried.
pub struct AlertSubmissionPipeline {
    store: Arc<dyn AlertStoreTrait>,
    persistence: Arc<dyn AlertPersistence>,
    hook: Arc<dyn AlertCreatedHook>,
}

impl AlertSubmissionPipeline {
    pub fn new(
        store: Arc<dyn AlertStoreTrait>,
        persistence: Arc<dyn AlertPersistence>,
        hook: Arc<dyn AlertCreatedHook>,
    ) -> Self {
        Self {
            store,
            persistence,
            hook,
        }
    }

    pub fn store(&self) -> &Arc<dyn AlertStoreTrait> {
        &self.store
    }

    /// Builds a validated draft from raw form input without side effects.
    ///
    /// An unparsable target is only an error for types that need one;
    /// other types drop it.
    pub fn prepare(
        &self,
        symbol: &str,
        alert_type: AlertType,
        target_price: Option<&str>,
    ) -> Result<NewAlert, SubmissionError> {
        let target_price = match parse_target_price(target_price) {
            Ok(price) => price,
            Err(e) if !alert_type.requires_target_price() => {
                debug!("Ignoring target for {} alert: {}", alert_type, e);
                None
            }
            Err(e) => return Err(e.into()),
        };
        let draft = NewAlert::new(symbol.trim(), alert_type, target_price);
        draft.validate()?;
        Ok(draft)
    }

    pub async fn submit(
        &self,
        symbol: &str,
        alert_type: AlertType,
        target_price: Option<&str>,
    ) -> Result<Alert, SubmissionError> {
        let draft = self.prepare(symbol, alert_type, target_price).map_err(|e| {
            warn!("Rejected {} alert draft for '{}': {}", alert_type, symbol, e.message);
            e
        })?;

        if let Err(e) = self.persistence.persist(&draft).await {
            error!(
                "Failed to persist {} alert for {}: {}",
                draft.alert_type, draft.symbol, e
            );
            return Err(SubmissionError::remote(e.to_string()));
        }

        let alert = self.store.create(draft)?;
        info!("Submitted {} alert {} for {}", alert.alert_type, alert.id, alert.symbol);
        self.hook.on_alert_created(&alert);

        Ok(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_target_price() {
        assert_eq!(parse_target_price(None).unwrap(), None);
        assert_eq!(parse_target_price(Some("   ")).unwrap(), None);
        assert_eq!(parse_target_price(Some("50000")).unwrap(), Some(dec!(50000)));
        assert_eq!(parse_target_price(Some(" 0.25 ")).unwrap(), Some(dec!(0.25)));
        assert_eq!(parse_target_price(Some("1e3")).unwrap(), Some(dec!(1000)));
        assert!(matches!(
            parse_target_price(Some("fifty")),
            Err(ValidationError::DecimalParse(_))
        ));
    }

    #[test]
    fn test_error_conversion_keeps_kind() {
        let validation: SubmissionError =
            Error::Validation(ValidationError::MissingField("symbol".to_string())).into();
        assert!(validation.is_validation());

        let remote: SubmissionError = Error::RemoteFailure("HTTP 503".to_string()).into();
        assert_eq!(remote.kind, SubmissionErrorKind::RemoteFailure);
        assert_eq!(remote.message, "HTTP 503");
        assert_eq!(
            remote.to_string(),
            "Alert submission failed (remote failure): HTTP 503"
        );
    }
}
