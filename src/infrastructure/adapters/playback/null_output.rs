//! Null Audio Output - 丢弃音频（无音频设备时使用）

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{AudioClip, AudioOutputPort, PlaybackError};

/// 丢弃音频的输出，可模拟播放时长
#[derive(Debug, Default)]
pub struct NullAudioOutput {
    simulated_duration: Duration,
    played: AtomicUsize,
}

impl NullAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(simulated_duration: Duration) -> Self {
        Self {
            simulated_duration,
            played: AtomicUsize::new(0),
        }
    }

    /// 已“播放”的片段数
    pub fn played(&self) -> usize {
        self.played.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioOutputPort for NullAudioOutput {
    async fn play(&self, clip: AudioClip) -> Result<(), PlaybackError> {
        tracing::debug!(audio_size = clip.len(), "Discarding audio");
        if !self.simulated_duration.is_zero() {
            tokio::time::sleep(self.simulated_duration).await;
        }
        self.played.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
