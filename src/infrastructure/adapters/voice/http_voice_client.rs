//! HTTP Voice Client - 调用后端逐行语音合成接口
//!
//! 实现 VoiceSynthesizerPort trait
//!
//! 后端 API:
//! POST http://localhost:8000/api/speak-line
//! Request: {"text": "...", "language": "en"}  (JSON)
//! Response: audio/mpeg binary；失败时为非 2xx，可能带 {"detail": "..."}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{AudioClip, SpeakRequest, VoiceError, VoiceSynthesizerPort};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeakHttpRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// 后端错误响应体
#[derive(Debug, Deserialize)]
pub(crate) struct DetailBody {
    pub(crate) detail: String,
}

/// 从错误响应体中提取 detail，失败时返回原文
pub(crate) fn error_detail(body: &str) -> String {
    serde_json::from_str::<DetailBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| body.to_string())
}

/// HTTP Voice 客户端配置
#[derive(Debug, Clone)]
pub struct HttpVoiceClientConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// 合成接口路径
    pub speak_path: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 网络错误时的重试次数
    pub max_retries: u32,
}

impl Default for HttpVoiceClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            speak_path: "/api/speak-line".to_string(),
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl HttpVoiceClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// HTTP Voice 客户端
pub struct HttpVoiceClient {
    client: Client,
    config: HttpVoiceClientConfig,
}

impl HttpVoiceClient {
    pub fn new(config: HttpVoiceClientConfig) -> Result<Self, VoiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VoiceError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn speak_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.speak_path
        )
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/docs", self.config.base_url.trim_end_matches('/'))
    }

    async fn send_once(&self, request: &SpeakRequest) -> Result<AudioClip, VoiceError> {
        let body = SpeakHttpRequest {
            text: &request.text,
            language: request.language.as_str(),
        };

        let response = self
            .client
            .post(self.speak_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VoiceError::Timeout
                } else if e.is_connect() {
                    VoiceError::NetworkError(format!("Cannot connect to voice service: {}", e))
                } else {
                    VoiceError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VoiceError::ServiceError {
                status: status.as_u16(),
                detail: error_detail(&error_text),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| VoiceError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if data.is_empty() {
            return Err(VoiceError::InvalidResponse("Empty audio body".to_string()));
        }

        Ok(AudioClip { data, content_type })
    }
}

#[async_trait]
impl VoiceSynthesizerPort for HttpVoiceClient {
    async fn synthesize(&self, request: SpeakRequest) -> Result<AudioClip, VoiceError> {
        tracing::debug!(
            url = %self.speak_url(),
            text_len = request.text.len(),
            language = %request.language,
            "Sending speak-line request"
        );

        let mut attempt = 0;
        loop {
            match self.send_once(&request).await {
                Ok(clip) => {
                    tracing::debug!(
                        audio_size = clip.len(),
                        content_type = ?clip.content_type,
                        "Speak-line audio received"
                    );
                    return Ok(clip);
                }
                // 只重试传输层错误，服务端明确拒绝的不重试
                Err(VoiceError::NetworkError(e)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::debug!(attempt, error = %e, "Retrying speak-line request");
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
    use serde_json::Value;

    use crate::domain::narration::LanguageTag;

    async fn speak_line(Json(body): Json<Value>) -> axum::response::Response {
        let text = body["text"].as_str().unwrap_or_default().to_string();
        let language = body["language"].as_str().unwrap_or_default().to_string();
        if text == "fail" {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"detail": "TTS failed: boom"})),
            )
                .into_response();
        }
        (
            [(http::header::CONTENT_TYPE, "audio/mpeg")],
            format!("{}|{}", language, text),
        )
            .into_response()
    }

    async fn spawn_backend() -> String {
        let app = Router::new().route("/api/speak-line", post(speak_line));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request(text: &str) -> SpeakRequest {
        SpeakRequest {
            text: text.to_string(),
            language: LanguageTag::new("en"),
        }
    }

    #[test]
    fn test_config_default() {
        let config = HttpVoiceClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.speak_path, "/api/speak-line");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpVoiceClientConfig::new("http://example.com:9000/")
            .with_timeout(60)
            .with_retries(2);
        let client = HttpVoiceClient::new(config).unwrap();
        assert_eq!(client.speak_url(), "http://example.com:9000/api/speak-line");
        assert_eq!(client.config.max_retries, 2);
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(error_detail(r#"{"detail":"TTS failed"}"#), "TTS failed");
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_synthesize_returns_audio() {
        let base_url = spawn_backend().await;
        let client = HttpVoiceClient::new(HttpVoiceClientConfig::new(base_url)).unwrap();

        let clip = client.synthesize(request("Hello.")).await.unwrap();

        assert_eq!(clip.data, b"en|Hello.".to_vec());
        assert_eq!(clip.content_type.as_deref(), Some("audio/mpeg"));
    }

    #[tokio::test]
    async fn test_non_success_maps_to_service_error() {
        let base_url = spawn_backend().await;
        let client = HttpVoiceClient::new(HttpVoiceClientConfig::new(base_url)).unwrap();

        let err = client.synthesize(request("fail")).await.unwrap_err();

        match err {
            VoiceError::ServiceError { status, detail } => {
                assert_eq!(status, 500);
                assert_eq!(detail, "TTS failed: boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = HttpVoiceClientConfig::new(format!("http://{}", addr)).with_retries(1);
        let client = HttpVoiceClient::new(config).unwrap();

        let err = client.synthesize(request("Hello.")).await.unwrap_err();
        assert!(matches!(err, VoiceError::NetworkError(_)));
    }
}
