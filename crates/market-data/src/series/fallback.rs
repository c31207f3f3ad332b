//! Synthetic price series used when the live feed is unavailable.
//!
//! The shape is a smooth sinusoid around a base price plus bounded uniform
//! noise, one point per day ending at `now`.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::MAX_WINDOW_DAYS;
use crate::models::{PricePoint, PriceSeries};

/// Milliseconds between two synthesized points.
pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Constants describing a plausible price range for one instrument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackShape {
    /// Centre of the sinusoid
    pub base: f64,
    /// Peak deviation of the sinusoid from `base`
    pub amplitude: f64,
    /// Radians advanced per point
    pub phase_step: f64,
    /// Upper bound (exclusive) of the uniform noise added to each point
    pub noise_span: f64,
}

impl Default for FallbackShape {
    /// A BTC-USD-like range.
    fn default() -> Self {
        Self {
            base: 95_000.0,
            amplitude: 5_000.0,
            phase_step: 0.5,
            noise_span: 2_000.0,
        }
    }
}

impl FallbackShape {
    /// Lowest price the shape can produce.
    pub fn floor(&self) -> f64 {
        (self.base - self.amplitude.abs()).max(0.0)
    }

    /// Highest price the shape can produce (exclusive of the noise bound).
    pub fn ceiling(&self) -> f64 {
        self.base + self.amplitude.abs() + self.noise_span.max(0.0)
    }

    fn price_at<R: Rng>(&self, index: usize, rng: &mut R) -> Decimal {
        let noise = if self.noise_span > 0.0 {
            rng.gen_range(0.0..self.noise_span)
        } else {
            0.0
        };
        let raw = self.base + self.amplitude * (index as f64 * self.phase_step).sin() + noise;
        Decimal::try_from(raw.max(0.0))
            .map(|d| d.round_dp(2))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Synthesize `window_days` daily points ending at `now`, using thread-local randomness.
pub fn synthesize(shape: &FallbackShape, window_days: u32, now: DateTime<Utc>) -> PriceSeries {
    synthesize_with_rng(shape, window_days, now, &mut rand::thread_rng())
}

/// Same as [`synthesize`] with a caller-supplied random source.
///
/// Windows longer than [`MAX_WINDOW_DAYS`] are truncated to their most
/// recent `MAX_WINDOW_DAYS` points.
pub fn synthesize_with_rng<R: Rng>(
    shape: &FallbackShape,
    window_days: u32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> PriceSeries {
    let count = window_days.min(MAX_WINDOW_DAYS) as usize;
    let points = (0..count)
        .filter_map(|i| {
            let days_back = (count - 1 - i) as i64;
            let timestamp = now.checked_sub_signed(Duration::days(days_back))?;
            Some(PricePoint::new(
                timestamp.timestamp_millis(),
                shape.price_at(i, rng),
            ))
        })
        .collect();

    PriceSeries::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_point_count_matches_window() {
        let now = Utc::now();
        assert_eq!(synthesize(&FallbackShape::default(), 7, now).len(), 7);
        assert_eq!(synthesize(&FallbackShape::default(), 30, now).len(), 30);
        assert!(synthesize(&FallbackShape::default(), 0, now).is_empty());
    }

    #[test]
    fn test_timestamps_are_one_day_apart_ending_now() {
        let now = Utc::now();
        let series = synthesize(&FallbackShape::default(), 7, now);

        assert_eq!(series.last().unwrap().timestamp, now.timestamp_millis());
        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, DAY_MILLIS);
        }
    }

    #[test]
    fn test_prices_stay_within_shape_bounds() {
        let shape = FallbackShape::default();
        let floor = Decimal::try_from(shape.floor()).unwrap();
        let ceiling = Decimal::try_from(shape.ceiling()).unwrap();

        for _ in 0..20 {
            for point in synthesize(&shape, 14, Utc::now()).iter() {
                assert!(point.price >= floor, "{} below {}", point.price, floor);
                assert!(point.price <= ceiling, "{} above {}", point.price, ceiling);
            }
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let now = Utc::now();
        let shape = FallbackShape::default();
        let a = synthesize_with_rng(&shape, 7, now, &mut StdRng::seed_from_u64(7));
        let b = synthesize_with_rng(&shape, 7, now, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_without_noise_follows_sinusoid() {
        let shape = FallbackShape {
            base: 100.0,
            amplitude: 10.0,
            phase_step: 0.5,
            noise_span: 0.0,
        };
        let series = synthesize(&shape, 3, Utc::now());
        let expected: Vec<Decimal> = (0..3)
            .map(|i| Decimal::try_from(100.0 + 10.0 * (i as f64 * 0.5).sin()).unwrap().round_dp(2))
            .collect();
        let actual: Vec<Decimal> = series.iter().map(|p| p.price).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_negative_shape_is_clamped_to_zero() {
        let shape = FallbackShape {
            base: -50.0,
            amplitude: 1.0,
            phase_step: 0.5,
            noise_span: 0.0,
        };
        assert!(synthesize(&shape, 5, Utc::now())
            .iter()
            .all(|p| p.price == Decimal::ZERO));
    }

    #[test]
    fn test_oversized_window_is_truncated() {
        let now = Utc::now();
        let series = synthesize(&FallbackShape::default(), u32::MAX, now);

        assert_eq!(series.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(series.last().unwrap().timestamp, now.timestamp_millis());
        assert_eq!(
            series.first().unwrap().timestamp,
            now.timestamp_millis() - (MAX_WINDOW_DAYS as i64 - 1) * DAY_MILLIS
        );
    }
}
