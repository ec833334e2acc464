//! HTTP API module
//! 
//! This module contains the HTTP control endpoints and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/stop", post(stop_handler))
        .route("/skip", post(skip_handler))
        .route("/restart", post(restart_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the HTTP control listener.
///
/// A failed bind disables the API instead of the whole process; keyboard and
/// display keep driving the clock.
pub async fn bind_control_api(addr: &str) -> Option<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("HTTP control API on http://{}", addr);
            info!("  POST /start /stop /skip /restart, GET /status /health");
            Some(listener)
        }
        Err(e) => {
            warn!("Failed to bind HTTP control API on {}: {}; continuing without it", addr, e);
            None
        }
    }
}
