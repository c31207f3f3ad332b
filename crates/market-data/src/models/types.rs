use std::borrow::Cow;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// Epoch milliseconds, as delivered by price-history endpoints
pub type EpochMillis = i64;
