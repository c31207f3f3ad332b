mod commands;
mod config;
mod main_lib;

use commands::Command;
use config::Config;
use cryptosentry_market_data::RefreshScheduler;
use main_lib::{build_state, init_tracing, watch_prices};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let state = build_state(&config)?;

    tokio::spawn(watch_prices(state.prices.clone()));

    // First tick is immediate, so the initial fetch happens right away.
    let mut scheduler = RefreshScheduler::new();
    scheduler.start_refreshing(state.prices.clone());

    commands::execute(&state, Command::AnomalyStatus).await;
    tracing::info!("{}", commands::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match line.parse::<Command>() {
                    Ok(command) => commands::execute(&state, command).await,
                    Err(e) => tracing::warn!("{} ({})", e, commands::HELP),
                },
                None => {
                    tracing::debug!("stdin closed, monitoring until interrupted");
                    stdin_open = false;
                }
            },
        }
    }

    scheduler.stop();
    tracing::info!("Shutting down");
    Ok(())
}
