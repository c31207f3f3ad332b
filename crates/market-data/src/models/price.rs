use std::ops::Deref;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::EpochMillis;

/// A single observation in a price series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Observation time in epoch milliseconds
    pub timestamp: EpochMillis,
    /// Observed price, never negative
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: EpochMillis, price: Decimal) -> Self {
        Self { timestamp, price }
    }

    /// The timestamp as a UTC datetime, if it is within chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Time-ordered price observations for one instrument.
///
/// Points keep source order; timestamps are non-decreasing and duplicates
/// are allowed. A series is replaced wholesale, never merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from points already in source order.
    ///
    /// Out-of-order input is stably sorted by timestamp so the
    /// non-decreasing invariant holds; equal timestamps keep their order.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        if !points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp) {
            points.sort_by_key(|p| p.timestamp);
        }
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The trailing `n` points (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}

impl Deref for PriceSeries {
    type Target = [PricePoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_series_keeps_source_order_and_duplicates() {
        let series = PriceSeries::new(vec![
            PricePoint::new(1_000, dec!(10)),
            PricePoint::new(1_000, dec!(11)),
            PricePoint::new(2_000, dec!(12)),
        ]);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].price, dec!(10));
        assert_eq!(series[1].price, dec!(11));
    }

    #[test]
    fn test_series_sorts_out_of_order_input() {
        let series = PriceSeries::new(vec![
            PricePoint::new(3_000, dec!(3)),
            PricePoint::new(1_000, dec!(1)),
            PricePoint::new(2_000, dec!(2)),
        ]);
        let stamps: Vec<_> = series.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![1_000, 2_000, 3_000]);
    }

    #[test]
    fn test_tail_is_bounded() {
        let series = PriceSeries::new(vec![PricePoint::new(1, dec!(1))]);
        assert_eq!(series.tail(2).len(), 1);
        assert!(PriceSeries::empty().tail(2).is_empty());
    }

    #[test]
    fn test_point_datetime() {
        let point = PricePoint::new(86_400_000, dec!(1));
        assert_eq!(point.datetime().unwrap().to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }
}
