use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::Currency;
use crate::errors::MarketDataError;

/// Provider-agnostic identifier for a tradable crypto pair, e.g. `BTC-USD`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentId {
    /// Base asset ticker, upper case (`BTC`)
    pub base: Arc<str>,
    /// Quote currency, upper case (`USD`)
    pub quote: Currency,
}

impl InstrumentId {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: Arc::from(base.to_ascii_uppercase()),
            quote: Cow::Owned(quote.to_ascii_uppercase()),
        }
    }

    /// Parses `BASE-QUOTE`. Both halves must be non-empty alphanumerics.
    pub fn parse(symbol: &str) -> Result<Self, MarketDataError> {
        let (base, quote) = symbol
            .trim()
            .split_once('-')
            .ok_or_else(|| MarketDataError::InvalidInstrument(symbol.to_string()))?;

        let valid = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid(base) || !valid(quote) {
            return Err(MarketDataError::InvalidInstrument(symbol.to_string()));
        }

        Ok(Self::new(base, quote))
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for InstrumentId {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InstrumentId {
    type Error = MarketDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<InstrumentId> for String {
    fn from(value: InstrumentId) -> Self {
        value.to_string()
    }
}
