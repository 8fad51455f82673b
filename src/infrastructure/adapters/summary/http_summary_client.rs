//! HTTP Summary Client - 调用后端视频摘要接口
//!
//! 后端 API:
//! POST http://localhost:8000/api/summarize
//! Request: {"youtube_url": "..."}
//! Response: {"video_id", "language", "transcript_excerpt", "summary"}；失败时 {"detail": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{SummarizerPort, SummaryError, VideoSummary};
use crate::domain::narration::LanguageTag;
use crate::domain::video::VideoUrl;
use crate::infrastructure::adapters::voice::error_detail;

#[derive(Debug, Serialize)]
struct SummarizeHttpRequest<'a> {
    youtube_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummarizeHttpResponse {
    #[serde(default)]
    video_id: Option<String>,
    language: String,
    #[serde(default)]
    transcript_excerpt: Option<String>,
    summary: String,
}

/// HTTP Summary 客户端配置
#[derive(Debug, Clone)]
pub struct HttpSummaryClientConfig {
    pub base_url: String,
    pub summarize_path: String,
    /// 摘要需要抓取字幕并调用大模型，超时应足够长
    pub timeout_secs: u64,
}

impl Default for HttpSummaryClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            summarize_path: "/api/summarize".to_string(),
            timeout_secs: 120,
        }
    }
}

/// HTTP Summary 客户端
pub struct HttpSummaryClient {
    client: Client,
    config: HttpSummaryClientConfig,
}

impl HttpSummaryClient {
    pub fn new(config: HttpSummaryClientConfig) -> Result<Self, SummaryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SummaryError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn summarize_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.summarize_path
        )
    }
}

#[async_trait]
impl SummarizerPort for HttpSummaryClient {
    async fn summarize(&self, video_url: &VideoUrl) -> Result<VideoSummary, SummaryError> {
        tracing::debug!(
            url = %self.summarize_url(),
            video_id = %video_url.id(),
            "Sending summarize request"
        );

        let response = self
            .client
            .post(self.summarize_url())
            .json(&SummarizeHttpRequest {
                youtube_url: video_url.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummaryError::Timeout
                } else if e.is_connect() {
                    SummaryError::NetworkError(format!("Cannot connect to backend: {}", e))
                } else {
                    SummaryError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = error_detail(&error_text);
            return Err(SummaryError::Rejected {
                status: status.as_u16(),
                detail: if detail.is_empty() {
                    "Something went wrong.".to_string()
                } else {
                    detail
                },
            });
        }

        let body: SummarizeHttpResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            video_id = ?body.video_id,
            language = %body.language,
            summary_len = body.summary.len(),
            "Summary received"
        );

        Ok(VideoSummary {
            video_id: body.video_id,
            language: LanguageTag::new(body.language),
            transcript_excerpt: body.transcript_excerpt,
            summary: body.summary.trim().to_string(),
        })
    }
}
