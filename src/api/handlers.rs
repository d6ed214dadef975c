//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    countdown::{CountdownError, CountdownSnapshot},
    display::board::DisplayView,
    state::AppState,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Error half of every countdown control handler
pub type ApiError = (StatusCode, Json<ApiResponse>);

/// Query parameters of POST /countdown/reset
#[derive(Debug, Default, Deserialize)]
pub struct ResetParams {
    pub minutes: Option<f64>,
}

fn countdown_error(state: &AppState, e: CountdownError) -> ApiError {
    let status = match e {
        CountdownError::InvalidMinutes(_) => StatusCode::BAD_REQUEST,
        CountdownError::NotInitialized | CountdownError::Exhausted => StatusCode::CONFLICT,
        CountdownError::TaskGone => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Countdown request failed: {}", e);
    } else {
        warn!("Countdown request rejected: {}", e);
    }
    (status, Json(ApiResponse::error(e.to_string(), state.countdown_snapshot())))
}

fn respond(
    state: &AppState,
    message: String,
    result: Result<CountdownSnapshot, CountdownError>,
) -> Result<Json<ApiResponse>, ApiError> {
    match result {
        Ok(snapshot) => Ok(Json(ApiResponse::from_phase(message, snapshot))),
        Err(e) => Err(countdown_error(state, e)),
    }
}

/// Handle POST /countdown/reset - Arm the countdown with a fresh duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResetParams>,
) -> Result<Json<ApiResponse>, ApiError> {
    let result = state.reset_countdown(params.minutes).await;
    if result.is_ok() {
        info!("Reset endpoint called - countdown armed");
    }
    respond(&state, "Countdown reset".to_string(), result)
}

/// Handle POST /countdown/start - Resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let result = state.start_countdown().await;
    if result.is_ok() {
        info!("Start endpoint called - countdown resumed");
    }
    respond(&state, "Countdown started".to_string(), result)
}

/// Handle POST /countdown/stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let result = state.stop_countdown().await;
    if result.is_ok() {
        info!("Stop endpoint called - countdown paused");
    }
    respond(&state, "Countdown stopped".to_string(), result)
}

/// Handle GET /status - Return current countdown status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.countdown_snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        remaining_seconds: countdown.remaining_seconds(),
        countdown,
        displays: state.displays.views(),
        max_time_minutes: state.max_time_minutes,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /displays - List displays and their content
pub async fn list_displays_handler(State(state): State<Arc<AppState>>) -> Json<Vec<DisplayView>> {
    Json(state.displays.views())
}

/// Handle PUT /displays/:name - Register a display
pub async fn add_display_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> (StatusCode, Json<DisplayView>) {
    let created = state.displays.add(&name);
    let content = state
        .displays
        .get(&name)
        .map(|e| e.content())
        .unwrap_or_default();
    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    (status, Json(DisplayView { name, content }))
}

/// Handle DELETE /displays/:name - Unregister a display
pub async fn remove_display_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> StatusCode {
    if state.displays.remove(&name) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
