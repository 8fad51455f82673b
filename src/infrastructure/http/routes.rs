//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/summarize          POST  生成视频摘要（可选自动朗读）
//! - /api/narration/start    POST  开始朗读
//! - /api/narration/stop     POST  停止朗读
//! - /api/narration/status   POST  查询会话状态
//! - /ws/narration           WS    朗读事件推送

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/narration", get(handlers::narration_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/summarize", post(handlers::summarize))
        .nest("/narration", narration_routes())
}

/// Narration 路由
fn narration_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/start", post(handlers::start_narration))
        .route("/stop", post(handlers::stop_narration))
        .route("/status", post(handlers::narration_status))
}
