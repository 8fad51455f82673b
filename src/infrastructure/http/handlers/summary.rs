//! Summary Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::SummarizeVideoCommand;
use crate::infrastructure::http::dto::{ApiResponse, SummarizeRequest, SummaryResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<ApiResponse<SummaryResponse>>, ApiError> {
    let cmd = SummarizeVideoCommand {
        video_url: req.video_url,
        narrate: req.narrate,
    };

    let result = state.summarize_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(result.into())))
}
