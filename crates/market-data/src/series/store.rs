//! Price series acquisition with fallback and a last-completed-wins cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::sync::watch;

use crate::config::PriceFeedConfig;
use crate::models::{DerivedMetrics, InstrumentId, PriceSeries};
use crate::provider::PriceHistoryProvider;

use super::fallback::synthesize;

/// The series currently on display, with its derived figures.
#[derive(Clone, Debug)]
pub struct SeriesSnapshot {
    pub instrument: InstrumentId,
    pub series: PriceSeries,
    pub metrics: DerivedMetrics,
    /// True when `series` is synthetic
    pub degraded: bool,
    /// Sequence number of the fetch that produced this snapshot
    pub sequence: u64,
    pub fetched_at: DateTime<Utc>,
}

/// Result of a single [`PriceSeriesStore::fetch`].
#[derive(Clone, Debug)]
pub struct FetchOutcome {
    pub series: PriceSeries,
    /// True when the live feed failed and `series` is synthetic
    pub degraded: bool,
    /// Why the live feed failed, when `degraded`
    pub cause: Option<String>,
    pub sequence: u64,
    /// False when a newer fetch had already been applied
    pub applied: bool,
}

/// Owns the price series for the tracked instrument.
///
/// Every fetch is numbered when it starts. A completed fetch replaces the
/// cached snapshot only if no higher-numbered fetch has been applied, so a
/// slow request can never overwrite a newer result.
pub struct PriceSeriesStore {
    provider: Arc<dyn PriceHistoryProvider>,
    config: PriceFeedConfig,
    next_sequence: AtomicU64,
    latest: watch::Sender<Option<Arc<SeriesSnapshot>>>,
}

impl PriceSeriesStore {
    pub fn new(provider: Arc<dyn PriceHistoryProvider>, config: PriceFeedConfig) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            provider,
            config,
            next_sequence: AtomicU64::new(0),
            latest,
        }
    }

    pub fn config(&self) -> &PriceFeedConfig {
        &self.config
    }

    /// Fetch `window_days` of daily prices for `instrument`.
    ///
    /// Never fails: on any provider error a synthetic series is returned
    /// with `degraded = true`. The result is cached unless a newer fetch has
    /// already completed.
    pub async fn fetch(&self, instrument: &InstrumentId, window_days: u32) -> FetchOutcome {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Fetch #{} for {} ({} days) via {}",
            sequence,
            instrument,
            window_days,
            self.provider.id()
        );

        let (series, cause) = match self
            .provider
            .get_price_history(instrument, window_days)
            .await
        {
            Ok(series) => (series, None),
            Err(e) => {
                warn!(
                    "Price feed for {} unavailable ({}), serving synthetic data",
                    instrument, e
                );
                let series = synthesize(&self.config.fallback, window_days, Utc::now());
                (series, Some(e.to_string()))
            }
        };
        let degraded = cause.is_some();

        let snapshot = Arc::new(SeriesSnapshot {
            instrument: instrument.clone(),
            metrics: DerivedMetrics::derive(&series),
            series: series.clone(),
            degraded,
            sequence,
            fetched_at: Utc::now(),
        });
        let applied = self.apply(snapshot);

        FetchOutcome {
            series,
            degraded,
            cause,
            sequence,
            applied,
        }
    }

    /// Fetch the configured instrument and window.
    pub async fn refresh(&self) -> FetchOutcome {
        let instrument = self.config.instrument.clone();
        self.fetch(&instrument, self.config.window_days).await
    }

    fn apply(&self, snapshot: Arc<SeriesSnapshot>) -> bool {
        let sequence = snapshot.sequence;
        let applied = self.latest.send_if_modified(|current| {
            let newer = current
                .as_ref()
                .map_or(true, |existing| sequence > existing.sequence);
            if newer {
                *current = Some(snapshot);
            }
            newer
        });

        if applied {
            info!("Applied price series #{}", sequence);
        } else {
            debug!("Discarded stale price series #{}", sequence);
        }
        applied
    }

    /// The most recently applied snapshot, if any fetch has completed.
    pub fn snapshot(&self) -> Option<Arc<SeriesSnapshot>> {
        self.latest.borrow().clone()
    }

    /// Metrics of the current snapshot, zeroed before the first fetch.
    pub fn metrics(&self) -> DerivedMetrics {
        self.snapshot()
            .map(|s| s.metrics.clone())
            .unwrap_or_default()
    }

    /// True when the current snapshot is synthetic.
    pub fn is_degraded(&self) -> bool {
        self.snapshot().map(|s| s.degraded).unwrap_or(false)
    }

    /// Receiver notified every time a snapshot is applied.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<SeriesSnapshot>>> {
        self.latest.subscribe()
    }
}
