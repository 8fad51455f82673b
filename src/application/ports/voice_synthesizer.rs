//! Voice Synthesizer Port - 远程语音合成抽象
//!
//! 定义逐行语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::narration::LanguageTag;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {detail}")]
    ServiceError { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 单行合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakRequest {
    /// 要合成的一行文本
    pub text: String,
    /// 语言标记（原样透传给后端）
    pub language: LanguageTag,
}

/// 合成得到的音频数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// 原始音频字节（通常为 audio/mpeg）
    pub data: Vec<u8>,
    /// 响应声明的 Content-Type
    pub content_type: Option<String>,
}

impl AudioClip {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            content_type: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Voice Synthesizer Port
#[async_trait]
pub trait VoiceSynthesizerPort: Send + Sync {
    /// 为一行文本请求合成音频
    async fn synthesize(&self, request: SpeakRequest) -> Result<AudioClip, VoiceError>;

    /// 检查语音服务是否可用
    async fn health_check(&self) -> bool {
        true
    }
}
