//! Audio Output Port - 本地音频播放抽象

use async_trait::async_trait;
use thiserror::Error;

use super::AudioClip;

/// 播放错误
///
/// 朗读循环把播放错误视为该行已结束，不会向上抛出
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No audio player available")]
    NoPlayer,

    #[error("Failed to prepare audio: {0}")]
    Io(String),

    #[error("Failed to start player {player}: {reason}")]
    SpawnFailed { player: String, reason: String },

    #[error("Player {player} exited with {status}")]
    PlayerFailed { player: String, status: String },

    #[error("Audio payload is empty")]
    EmptyAudio,
}

/// Audio Output Port
///
/// 约定：`play` 在播放自然结束或出错后才返回，
/// 为本次播放创建的临时资源必须在返回前释放
#[async_trait]
pub trait AudioOutputPort: Send + Sync {
    async fn play(&self, clip: AudioClip) -> Result<(), PlaybackError>;
}
