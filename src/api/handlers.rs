//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Control};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

/// Apply a transition and wrap the resulting snapshot
fn transition(state: &AppState, control: Control) -> Result<Json<ApiResponse>, StatusCode> {
    match state.apply(control) {
        Ok(snapshot) => {
            info!("{} endpoint called", control.as_str());
            let message = format!("{} applied: {} {}", control.as_str(), snapshot.current_label, snapshot.time);
            Ok(Json(ApiResponse::new(message.trim_end().to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", control.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    transition(&state, Control::Start)
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    transition(&state, Control::Stop)
}

/// Handle POST /skip - Jump to the next topic
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    transition(&state, Control::Skip)
}

/// Handle POST /restart - Go back to the first topic, stopped
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    transition(&state, Control::Restart)
}

/// Handle GET /status - Return the current snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        snapshot,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
