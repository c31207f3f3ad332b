use std::sync::Arc;

use cryptosentry_core::alerts::{
    Alert, AlertCreatedHook, AlertPersistence, AlertStore, AlertStoreTrait,
    AlertSubmissionPipeline, HttpAlertPersistence, SimulatedAlertPersistence,
};
use cryptosentry_core::anomaly::AnomalyClient;
use cryptosentry_market_data::{
    CoinGeckoProvider, DerivedMetrics, PriceHistoryProvider, PriceSeriesStore, SeriesSnapshot,
};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub prices: Arc<PriceSeriesStore>,
    pub alerts: Arc<AlertStore>,
    pub submissions: AlertSubmissionPipeline,
    pub anomaly: AnomalyClient,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn PriceHistoryProvider> = Arc::new(CoinGeckoProvider::with_base_url(
        &config.price_feed.base_url,
        config.price_feed.request_timeout,
    ));
    let prices = Arc::new(PriceSeriesStore::new(provider, config.price_feed.clone()));
    tracing::info!(
        "Tracking {} over {} days from {}",
        config.price_feed.instrument,
        config.price_feed.window_days,
        config.price_feed.base_url
    );

    // Without a credential the alert API would reject every request.
    let persistence: Arc<dyn AlertPersistence> = match &config.api_token {
        Some(token) => {
            tracing::info!("Persisting alerts to {}", config.alert_service.api_root());
            Arc::new(HttpAlertPersistence::new(&config.alert_service, Some(token))?)
        }
        None => {
            tracing::info!("No CS_API_TOKEN set, using simulated alert persistence");
            Arc::new(SimulatedAlertPersistence::from_config(&config.alert_service))
        }
    };

    let alerts = Arc::new(AlertStore::new());
    let hook: Arc<dyn AlertCreatedHook> = Arc::new(notify_alert_created(alerts.clone()));
    let submissions = AlertSubmissionPipeline::new(alerts.clone(), persistence, hook);
    let anomaly = AnomalyClient::new(&config.alert_service, config.api_token.as_ref())?;

    Ok(Arc::new(AppState {
        prices,
        alerts,
        submissions,
        anomaly,
    }))
}

fn notify_alert_created(store: Arc<AlertStore>) -> impl Fn(&Alert) + Send + Sync {
    move |alert: &Alert| {
        tracing::info!(
            "Alert created: {} {} ({} active, refresh token {})",
            alert.alert_type.label(),
            alert.symbol,
            store.len(),
            store.refresh_token()
        );
    }
}

fn format_decimal(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn format_optional(value: Option<Decimal>) -> String {
    value
        .map(format_decimal)
        .unwrap_or_else(|| "N/A".to_string())
}

/// One-line summary of the derived figures.
pub fn describe_metrics(metrics: &DerivedMetrics) -> String {
    format!(
        "price {} | change {}% | high {} | low {} | market cap {}",
        format_decimal(metrics.current_price),
        format_decimal(metrics.percent_change_pct()),
        format_optional(metrics.window_high),
        format_optional(metrics.window_low),
        format_optional(metrics.estimated_market_cap),
    )
}

pub fn describe_snapshot(snapshot: &SeriesSnapshot) -> String {
    let mut line = format!(
        "{} #{} ({} points): {}",
        snapshot.instrument,
        snapshot.sequence,
        snapshot.series.len(),
        describe_metrics(&snapshot.metrics)
    );
    if snapshot.degraded {
        line.push_str(" [synthetic data]");
    }
    line
}

pub fn describe_alert(alert: &Alert) -> String {
    let target = alert
        .target_price
        .map(|p| format!(" @ {}", p))
        .unwrap_or_default();
    format!(
        "{} {} {}{} (created {})",
        alert.id,
        alert.symbol,
        alert.alert_type,
        target,
        alert.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Logs every applied snapshot until the store is dropped.
pub async fn watch_prices(prices: Arc<PriceSeriesStore>) {
    let mut updates = prices.subscribe();
    let mut was_degraded = false;
    while updates.changed().await.is_ok() {
        let Some(snapshot) = updates.borrow_and_update().clone() else {
            continue;
        };
        if snapshot.degraded && !was_degraded {
            tracing::warn!(
                "Live prices for {} unavailable, showing synthetic data",
                snapshot.instrument
            );
        } else if !snapshot.degraded && was_degraded {
            tracing::info!("Live prices for {} restored", snapshot.instrument);
        }
        was_degraded = snapshot.degraded;
        tracing::info!("{}", describe_snapshot(&snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cryptosentry_core::AlertType;
    use cryptosentry_market_data::{InstrumentId, PricePoint, PriceSeries};
    use rust_decimal_macros::dec;

    fn snapshot(prices: &[Decimal], degraded: bool) -> SeriesSnapshot {
        let series = PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| PricePoint::new(i as i64 * 86_400_000, *p))
                .collect(),
        );
        SeriesSnapshot {
            instrument: InstrumentId::new("BTC", "USD"),
            metrics: DerivedMetrics::derive(&series),
            series,
            degraded,
            sequence: 3,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_describe_snapshot() {
        let line = describe_snapshot(&snapshot(&[dec!(100), dec!(110)], false));
        assert_eq!(
            line,
            "BTC-USD #3 (2 points): price 110 | change 10% | high 110 | low 100 | market cap 2145000000"
        );
    }

    #[test]
    fn test_describe_empty_and_degraded() {
        let line = describe_snapshot(&snapshot(&[], true));
        assert!(line.contains("high N/A | low N/A | market cap N/A"));
        assert!(line.ends_with("[synthetic data]"));
    }

    #[test]
    fn test_describe_alert() {
        let alert = Alert {
            id: "a-1".to_string(),
            symbol: "BTC-USD".to_string(),
            alert_type: AlertType::PriceTarget,
            target_price: Some(dec!(50000)),
            is_active: true,
            created_at: Utc::now(),
        };
        assert!(describe_alert(&alert).starts_with("a-1 BTC-USD PRICE_TARGET @ 50000 (created "));
    }
}
