//! Narration Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GetNarrationStatus, StartNarrationCommand, StopNarrationCommand};
use crate::domain::narration::SessionSnapshot;
use crate::infrastructure::http::dto::{ApiResponse, SessionRequest, StartNarrationRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Start
// ============================================================================

pub async fn start_narration(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartNarrationRequest>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, ApiError> {
    let cmd = StartNarrationCommand {
        text: req.text,
        language: req.language,
    };

    let snapshot = state.start_narration_handler.handle(cmd)?;

    Ok(Json(ApiResponse::success(snapshot)))
}

// ============================================================================
// Stop
// ============================================================================

pub async fn stop_narration(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, ApiError> {
    let cmd = StopNarrationCommand {
        session_id: req.session_id,
    };

    let snapshot = state.stop_narration_handler.handle(cmd)?;

    Ok(Json(ApiResponse::success(snapshot)))
}

// ============================================================================
// Status
// ============================================================================

pub async fn narration_status(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, ApiError> {
    let query = GetNarrationStatus {
        session_id: req.session_id,
    };

    let snapshot = state.narration_status_handler.handle(query)?;

    Ok(Json(ApiResponse::success(snapshot)))
}
