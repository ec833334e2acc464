//! Agenda Clock - A headless meeting timer
//!
//! This is the main entry point for the agenda-clock application.

use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};

use agenda_clock::{
    agenda::load_agenda_from_file,
    config::Config,
    state::AppState,
    api::{bind_control_api, create_router},
    tasks::{chime_task, display_task, keyboard_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let Some(agenda_path) = config.agenda.clone() else {
        eprintln!("{}", Config::usage());
        std::process::exit(1);
    };

    // Logs go to stderr so stdout stays clean for the display
    tracing_subscriber::fmt()
        .with_env_filter(format!("agenda_clock={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting agenda-clock v{}", env!("CARGO_PKG_VERSION"));

    let agenda = match load_agenda_from_file(&agenda_path).await {
        Ok(agenda) => agenda,
        Err(e) => {
            warn!("{:#}; continuing with an empty agenda", e);
            Vec::new()
        }
    };
    info!("Loaded {} topics from {}, chime={}", agenda.len(), agenda_path.display(), config.chime);

    let state = Arc::new(AppState::new(agenda, config.chime));

    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        ticker_task(ticker_state).await;
    });

    let display_state = Arc::clone(&state);
    let mode = config.display_mode();
    tokio::spawn(async move {
        display_task(display_state, mode).await;
    });

    if config.chime {
        let chime_state = Arc::clone(&state);
        let player = config.chime_player();
        tokio::spawn(async move {
            chime_task(chime_state, player).await;
        });
    }

    let quit = Arc::new(Notify::new());
    if !config.no_keyboard {
        let keyboard_state = Arc::clone(&state);
        let keyboard_quit = Arc::clone(&quit);
        tokio::spawn(async move {
            keyboard_task(keyboard_state, keyboard_quit).await;
        });
    }

    let listener = if config.no_http {
        None
    } else {
        bind_control_api(&config.address()).await
    };

    let app = create_router(Arc::clone(&state));
    let server = async move {
        match listener {
            Some(listener) => axum::serve(listener, app).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            match signal {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to install signal handlers: {}", e),
            }
        }
        _ = quit.notified() => {
            info!("Quit requested");
        }
    }

    info!("Shutdown complete");

    // A pending stdin read sits on the blocking pool and would hold up runtime shutdown
    std::process::exit(0);
}
