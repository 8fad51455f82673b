//! Fake Voice Client - 用于测试的语音客户端
//!
//! 不调用后端，返回固定音频；可配置延迟和必定失败的行

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{AudioClip, SpeakRequest, VoiceError, VoiceSynthesizerPort};

/// Fake Voice Client 配置
#[derive(Debug, Clone)]
pub struct FakeVoiceClientConfig {
    /// 固定返回的音频数据
    pub audio: Vec<u8>,
    /// 模拟的合成延迟
    pub latency: Duration,
    /// 这些行总是返回 HTTP 500
    pub failing_lines: Vec<String>,
}

impl Default for FakeVoiceClientConfig {
    fn default() -> Self {
        Self {
            audio: b"ID3fake-mpeg-frame".to_vec(),
            latency: Duration::from_millis(10),
            failing_lines: Vec::new(),
        }
    }
}

/// Fake Voice Client
pub struct FakeVoiceClient {
    config: FakeVoiceClientConfig,
    /// 已收到的请求（按顺序）
    requests: Mutex<Vec<SpeakRequest>>,
}

impl FakeVoiceClient {
    pub fn new(config: FakeVoiceClientConfig) -> Self {
        tracing::info!(
            audio_size = config.audio.len(),
            latency_ms = config.latency.as_millis() as u64,
            "FakeVoiceClient initialized"
        );
        Self {
            config,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeVoiceClientConfig::default())
    }

    /// 已请求合成的文本
    pub fn requested_lines(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.iter().map(|req| req.text.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl VoiceSynthesizerPort for FakeVoiceClient {
    async fn synthesize(&self, request: SpeakRequest) -> Result<AudioClip, VoiceError> {
        tracing::debug!(
            text_len = request.text.len(),
            language = %request.language,
            "FakeVoiceClient: returning fixed audio"
        );

        let failing = self.config.failing_lines.contains(&request.text);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        tokio::time::sleep(self.config.latency).await;

        if failing {
            return Err(VoiceError::ServiceError {
                status: 500,
                detail: "TTS failed".to_string(),
            });
        }

        Ok(AudioClip {
            data: self.config.audio.clone(),
            content_type: Some("audio/mpeg".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::narration::LanguageTag;

    #[tokio::test]
    async fn test_fake_client_records_and_fails_configured_lines() {
        let client = FakeVoiceClient::new(FakeVoiceClientConfig {
            latency: Duration::ZERO,
            failing_lines: vec!["bad".to_string()],
            ..Default::default()
        });

        let ok = client
            .synthesize(SpeakRequest {
                text: "good".to_string(),
                language: LanguageTag::new("en"),
            })
            .await;
        let bad = client
            .synthesize(SpeakRequest {
                text: "bad".to_string(),
                language: LanguageTag::new("en"),
            })
            .await;

        assert!(ok.is_ok());
        assert!(matches!(bad, Err(VoiceError::ServiceError { status: 500, .. })));
        assert_eq!(client.requested_lines(), vec!["good", "bad"]);
    }
}
