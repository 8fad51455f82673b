//! Summarizer Port - 视频摘要服务抽象

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::narration::LanguageTag;
use crate::domain::video::VideoUrl;

/// 摘要服务错误
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    /// 后端返回非成功状态，detail 来自响应体 `{"detail": ...}`
    #[error("Summarization rejected (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 视频摘要结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    pub video_id: Option<String>,
    /// 后端检测到的字幕语言
    pub language: LanguageTag,
    pub transcript_excerpt: Option<String>,
    pub summary: String,
}

#[async_trait]
pub trait SummarizerPort: Send + Sync {
    async fn summarize(&self, video_url: &VideoUrl) -> Result<VideoSummary, SummaryError>;
}
