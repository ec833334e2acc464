//! One-second tick source for the agenda clock

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::{AppState, TickerCommand};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the clock once per second while it is armed.
///
/// Every `Armed` command starts a fresh interval, so the first tick lands a
/// full second after the transition that armed it.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut commands = state.subscribe_ticker();

    loop {
        let command = *commands.borrow_and_update();

        match command {
            TickerCommand::Halted => {
                debug!("Ticker halted, waiting for the next command");
                if commands.changed().await.is_err() {
                    break;
                }
            }
            TickerCommand::Armed { generation } => {
                debug!("Ticker armed (generation {})", generation);
                let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

                loop {
                    tokio::select! {
                        biased;

                        // Re-armed or halted: drop this interval and re-read the command
                        changed = commands.changed() => {
                            if changed.is_err() {
                                info!("Ticker command channel closed, stopping ticker task");
                                return;
                            }
                            break;
                        }

                        _ = interval.tick() => {
                            if let Err(e) = state.tick(generation) {
                                error!("Failed to apply tick: {}", e);
                            }
                        }
                    }
                }
            }
        }
    }

    info!("Ticker task stopped");
}
