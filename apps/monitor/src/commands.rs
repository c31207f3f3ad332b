//! Line commands read from stdin while the monitor runs.

use std::str::FromStr;

use cryptosentry_core::alerts::AlertStoreTrait;
use cryptosentry_core::AlertType;

use crate::main_lib::{describe_alert, describe_metrics, describe_snapshot, AppState};

pub const HELP: &str = "commands: refresh | metrics | alerts | alert <SYMBOL> <TYPE> [TARGET] | \
delete <ID> | status | analyze [SYMBOL] | help";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Metrics,
    ListAlerts,
    CreateAlert {
        symbol: String,
        alert_type: AlertType,
        target_price: Option<String>,
    },
    DeleteAlert(String),
    AnomalyStatus,
    Analyze(Option<String>),
    Help,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err("empty command".to_string());
        };
        let args: Vec<&str> = parts.collect();

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("refresh", []) => Ok(Command::Refresh),
            ("metrics", []) => Ok(Command::Metrics),
            ("alerts" | "list", []) => Ok(Command::ListAlerts),
            ("alert", [symbol, alert_type, rest @ ..]) if rest.len() <= 1 => {
                let alert_type = alert_type.parse::<AlertType>().map_err(|e| e.to_string())?;
                Ok(Command::CreateAlert {
                    symbol: symbol.to_string(),
                    alert_type,
                    target_price: rest.first().map(|s| s.to_string()),
                })
            }
            ("delete", [id]) => Ok(Command::DeleteAlert(id.to_string())),
            ("status", []) => Ok(Command::AnomalyStatus),
            ("analyze", []) => Ok(Command::Analyze(None)),
            ("analyze", [symbol]) => Ok(Command::Analyze(Some(symbol.to_string()))),
            ("help" | "?", _) => Ok(Command::Help),
            _ => Err(format!("unrecognized command '{}'", line.trim())),
        }
    }
}

pub async fn execute(state: &AppState, command: Command) {
    match command {
        Command::Refresh => {
            let outcome = state.prices.refresh().await;
            if let Some(cause) = &outcome.cause {
                tracing::warn!("Refresh fell back to synthetic data: {}", cause);
            }
        }
        Command::Metrics => match state.prices.snapshot() {
            Some(snapshot) => tracing::info!("{}", describe_snapshot(&snapshot)),
            None => tracing::info!("No prices yet: {}", describe_metrics(&state.prices.metrics())),
        },
        Command::ListAlerts => {
            let alerts = state.alerts.list();
            tracing::info!(
                "{} alert(s), refresh token {}",
                alerts.len(),
                state.alerts.refresh_token()
            );
            for alert in &alerts {
                tracing::info!("  {}", describe_alert(alert));
            }
        }
        Command::CreateAlert {
            symbol,
            alert_type,
            target_price,
        } => {
            if let Err(e) = state
                .submissions
                .submit(&symbol, alert_type, target_price.as_deref())
                .await
            {
                tracing::warn!("{}", e);
            }
        }
        Command::DeleteAlert(id) => {
            if state.alerts.delete(&id) {
                tracing::info!("Deleted alert {}", id);
            } else {
                tracing::info!("No alert with id {}", id);
            }
        }
        Command::AnomalyStatus => match state.anomaly.status().await {
            Ok(status) => tracing::info!(
                "Anomaly service {} (model loaded: {})",
                status.status,
                status.model_loaded
            ),
            Err(e) => tracing::warn!("Anomaly service unavailable: {}", e),
        },
        Command::Analyze(symbol) => {
            let symbol = symbol.unwrap_or_else(|| state.prices.config().instrument.to_string());
            match state.anomaly.analyze(&symbol).await {
                Ok(analysis) if analysis.failed() => tracing::warn!(
                    "Analysis of {} failed: {}",
                    symbol,
                    analysis.error.unwrap_or_default()
                ),
                Ok(analysis) => tracing::info!(
                    "{}: {} (score {:.1}%)",
                    symbol,
                    if analysis.is_anomaly {
                        "anomaly detected"
                    } else {
                        "normal patterns"
                    },
                    analysis.score_pct()
                ),
                Err(e) => tracing::warn!("Analysis of {} failed: {}", symbol, e),
            }
        }
        Command::Help => tracing::info!("{}", HELP),
    }
}
