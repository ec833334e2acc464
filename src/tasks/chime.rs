//! Chime background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{services::ChimePlayer, state::AppState};

/// Background task that plays a chime for every chime event.
///
/// Each playback runs detached; failures are logged and never reach the clock.
pub async fn chime_task(state: Arc<AppState>, player: ChimePlayer) {
    info!("Starting chime task");

    let mut chimes = state.subscribe_chimes();

    loop {
        match chimes.recv().await {
            Ok(event) => {
                info!("Chime: one second left on {:?}", event.label);
                let player = player.clone();
                tokio::spawn(async move {
                    if let Err(e) = player.play().await {
                        warn!("Chime playback failed: {}", e);
                    }
                });
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Chime task lagged, dropped {} chimes", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
