//! Alert domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// What an alert watches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    PriceTarget,
    Anomaly,
    TrendUp,
    TrendDown,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        AlertType::PriceTarget,
        AlertType::Anomaly,
        AlertType::TrendUp,
        AlertType::TrendDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::PriceTarget => "PRICE_TARGET",
            AlertType::Anomaly => "ANOMALY",
            AlertType::TrendUp => "TREND_UP",
            AlertType::TrendDown => "TREND_DOWN",
        }
    }

    /// Human-readable label, e.g. "price target".
    pub fn label(&self) -> String {
        self.as_str().to_lowercase().replace('_', " ")
    }

    /// Only price-target alerts need a target price.
    pub fn requires_target_price(&self) -> bool {
        matches!(self, AlertType::PriceTarget)
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AlertType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidInput(format!("Unknown alert type '{}'", s)))
    }
}

/// Domain model representing an alert owned by the current session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub symbol: String,
    pub alert_type: AlertType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAlert {
    pub symbol: String,
    pub alert_type: AlertType,
    pub target_price: Option<Decimal>,
}

impl NewAlert {
    pub fn new(symbol: impl Into<String>, alert_type: AlertType, target_price: Option<Decimal>) -> Self {
        Self {
            symbol: symbol.into(),
            alert_type,
            target_price,
        }
    }

    /// Checks the draft can become an alert.
    ///
    /// The symbol must be non-blank and a price-target alert needs a
    /// strictly positive target price.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }

        if self.alert_type.requires_target_price() {
            match self.target_price {
                None => {
                    return Err(ValidationError::MissingField("targetPrice".to_string()).into())
                }
                Some(price) if price <= Decimal::ZERO => {
                    return Err(ValidationError::InvalidInput(format!(
                        "Target price must be positive, got {}",
                        price
                    ))
                    .into())
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}
