//! Trend and range figures derived from a [`PriceSeries`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::PriceSeries;

/// Number of trailing points the high/low window covers.
///
/// Two points of a daily series, not a rolling 24 hours.
pub const HIGH_LOW_WINDOW_POINTS: usize = 2;

/// Fixed circulating supply used for the market-cap estimate.
pub const CIRCULATING_SUPPLY: Decimal = Decimal::from_parts(19_500_000, 0, 0, false, 0);

/// Figures computed from a series on demand. Never stored on their own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Price of the last point, zero for an empty series
    pub current_price: Decimal,
    /// Fractional change between the last two points (0.01 == 1%)
    pub percent_change: Decimal,
    /// Highest price over the trailing window, `None` for an empty series
    pub window_high: Option<Decimal>,
    /// Lowest price over the trailing window, `None` for an empty series
    pub window_low: Option<Decimal>,
    /// `current_price` times [`CIRCULATING_SUPPLY`], `None` when there is no price
    pub estimated_market_cap: Option<Decimal>,
}

impl DerivedMetrics {
    /// Computes metrics for any series, including the empty one.
    pub fn derive(series: &PriceSeries) -> Self {
        let current_price = series.last().map(|p| p.price).unwrap_or(Decimal::ZERO);

        let percent_change = match series.tail(2) {
            [previous, last] => (last.price - previous.price)
                .checked_div(previous.price)
                .unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        };

        let window = series.tail(HIGH_LOW_WINDOW_POINTS);
        let window_high = window.iter().map(|p| p.price).max();
        let window_low = window.iter().map(|p| p.price).min();

        let estimated_market_cap = if current_price.is_zero() {
            None
        } else {
            current_price.checked_mul(CIRCULATING_SUPPLY)
        };

        Self {
            current_price,
            percent_change,
            window_high,
            window_low,
            estimated_market_cap,
        }
    }

    /// The change as a percentage (`percent_change * 100`).
    pub fn percent_change_pct(&self) -> Decimal {
        self.percent_change * Decimal::ONE_HUNDRED
    }

    pub fn is_rising(&self) -> bool {
        !self.percent_change.is_sign_negative()
    }
}

/// Free-function form of [`DerivedMetrics::derive`].
pub fn derive_metrics(series: &PriceSeries) -> DerivedMetrics {
    DerivedMetrics::derive(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use rust_decimal_macros::dec;

    fn series(prices: &[Decimal]) -> PriceSeries {
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(i as i64 * 86_400_000, *p))
                .collect(),
        )
    }

    #[test]
    fn test_empty_series_is_zeroed() {
        let metrics = derive_metrics(&PriceSeries::empty());
        assert_eq!(metrics.current_price, Decimal::ZERO);
        assert_eq!(metrics.percent_change, Decimal::ZERO);
        assert!(metrics.window_high.is_none());
        assert!(metrics.window_low.is_none());
        assert!(metrics.estimated_market_cap.is_none());
    }

    #[test]
    fn test_single_point_has_no_change() {
        let metrics = derive_metrics(&series(&[dec!(95000)]));
        assert_eq!(metrics.current_price, dec!(95000));
        assert_eq!(metrics.percent_change, Decimal::ZERO);
        assert_eq!(metrics.window_high, Some(dec!(95000)));
        assert_eq!(metrics.window_low, Some(dec!(95000)));
    }

    #[test]
    fn test_change_uses_last_two_points_only() {
        let s = series(&[
            dec!(95000),
            dec!(94000),
            dec!(93000),
            dec!(99000),
            dec!(98000),
            dec!(96000),
            dec!(97000),
        ]);
        let metrics = derive_metrics(&s);
        assert_eq!(metrics.current_price, dec!(97000));
        assert_eq!(
            metrics.percent_change,
            (dec!(97000) - dec!(96000)) / dec!(96000)
        );
        assert!(metrics.is_rising());
    }

    #[test]
    fn test_high_low_cover_trailing_two_points() {
        let s = series(&[dec!(120000), dec!(80000), dec!(96000), dec!(97000)]);
        let metrics = derive_metrics(&s);
        assert_eq!(metrics.window_high, Some(dec!(97000)));
        assert_eq!(metrics.window_low, Some(dec!(96000)));
    }

    #[test]
    fn test_market_cap_uses_fixed_supply() {
        let metrics = derive_metrics(&series(&[dec!(100)]));
        assert_eq!(metrics.estimated_market_cap, Some(dec!(1950000000)));
    }

    #[test]
    fn test_zero_previous_price_yields_zero_change() {
        let metrics = derive_metrics(&series(&[dec!(0), dec!(10)]));
        assert_eq!(metrics.percent_change, Decimal::ZERO);
    }

    #[test]
    fn test_falling_change_is_negative() {
        let metrics = derive_metrics(&series(&[dec!(100), dec!(90)]));
        assert_eq!(metrics.percent_change, dec!(-0.1));
        assert_eq!(metrics.percent_change_pct(), dec!(-10.0));
        assert!(!metrics.is_rising());
    }

    #[test]
    fn test_derive_does_not_mutate_series() {
        let s = series(&[dec!(1), dec!(2)]);
        let before = s.clone();
        let _ = derive_metrics(&s);
        assert_eq!(s, before);
    }
}
