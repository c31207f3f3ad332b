//! Periodic re-fetch driver.
//!
//! Invokes a callback immediately and then on a fixed interval until stopped.
//! Each invocation is spawned on its own task so a slow callback never delays
//! the next tick; callers that overlap (such as [`PriceSeriesStore`]) must
//! tolerate concurrent in-flight work.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::series::PriceSeriesStore;

/// Shortest accepted interval; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A cancellable fixed-interval timer with at most one active schedule.
///
/// Must be started from within a Tokio runtime. Dropping the scheduler
/// stops it.
#[derive(Default)]
pub struct RefreshScheduler {
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` now and then every `period` until [`stop`](Self::stop).
    ///
    /// Starting while already running replaces the previous schedule.
    pub fn start<F, Fut>(&mut self, callback: F, period: Duration)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop();

        let period = if period < MIN_INTERVAL {
            warn!("Refresh interval {:?} too short, using {:?}", period, MIN_INTERVAL);
            MIN_INTERVAL
        } else {
            period
        };

        info!("Refresh scheduler started ({:?} interval)", period);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("Refresh tick");
                tokio::spawn(callback());
            }
        }));
    }

    /// Refresh `store` on its configured interval.
    pub fn start_refreshing(&mut self, store: Arc<PriceSeriesStore>) {
        let period = store.config().refresh_interval;
        self.start(
            move || {
                let store = store.clone();
                async move {
                    store.refresh().await;
                }
            },
            period,
        );
    }

    /// Cancel the pending timer. Safe to call when not running.
    ///
    /// Callback invocations already in flight run to completion.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("Refresh scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
