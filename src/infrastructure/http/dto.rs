//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::SummarizeVideoResponse;
use crate::domain::narration::SessionSnapshot;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Summary DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub video_url: String,
    /// 摘要完成后自动朗读
    #[serde(default)]
    pub narrate: bool,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub video_id: String,
    pub language: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_excerpt: Option<String>,
    pub thumbnail_url: String,
    pub watch_url: String,
    /// narrate = true 时启动的会话
    pub session: Option<SessionSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_error: Option<String>,
}

impl From<SummarizeVideoResponse> for SummaryResponse {
    fn from(r: SummarizeVideoResponse) -> Self {
        Self {
            video_id: r.video_id,
            language: r.language,
            summary: r.summary,
            transcript_excerpt: r.transcript_excerpt,
            thumbnail_url: r.thumbnail_url,
            watch_url: r.watch_url,
            session: r.narration,
            session_error: r.narration_error,
        }
    }
}

// ============================================================================
// Narration DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartNarrationRequest {
    pub text: String,
    pub language: String,
}

/// stop / status 共用，session_id 为空表示当前会话
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}
