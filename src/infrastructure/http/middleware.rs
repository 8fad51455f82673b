//! HTTP Middleware
//!
//! 控制 API 请求日志

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// 控制 API 请求日志中间件
///
/// 所有请求在 debug 级别记录耗时；HTTP 层 4xx / 5xx（如 JSON 解析失败、路由不存在）
/// 额外记录 warn / error。业务错误（errno != 0）在 ApiError 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, "Control API server error");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, latency_ms, "Control API request rejected");
    } else {
        tracing::debug!(%method, %path, status, latency_ms, "Control API request served");
    }

    response
}
