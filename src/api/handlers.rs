//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Intent};
use super::responses::{
    ApiResponse, DisplayHints, HealthResponse, ScheduleQuery, ScheduleResponse, StatusResponse,
};

/// Handle POST /toggle - Pause or resume the timer
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    forward(&state, Intent::TogglePause).await
}

/// Handle POST /exit - Leave the timer
pub async fn exit_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    forward(&state, Intent::Exit).await
}

async fn forward(state: &AppState, intent: Intent) -> Result<Json<ApiResponse>, StatusCode> {
    match state.send_intent(intent).await {
        Ok(()) => {
            info!("{} endpoint called", intent.action_name());
            Ok(Json(ApiResponse::accepted(format!(
                "{} intent forwarded",
                intent.action_name()
            ))))
        }
        Err(e) => {
            error!("Failed to forward {} intent: {}", intent.action_name(), e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /status - Return the current timer face
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        display: DisplayHints::from_snapshot(&session),
        session,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /schedule - Return one page of the phase outline
pub async fn schedule_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Json<ScheduleResponse> {
    let schedule = &state.schedule;
    let limit = query.limit();
    let mut phases: Vec<_> = schedule
        .phases_from(query.from.unwrap_or(0))
        .take(limit + 1)
        .collect();
    let next_from = if phases.len() > limit {
        phases.pop().map(|p| p.start_tick)
    } else {
        None
    };

    Json(ScheduleResponse {
        total_secs: schedule.total_secs(),
        phase_count: schedule.phase_count(),
        phases,
        next_from,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
