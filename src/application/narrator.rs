//! Narrator - 逐行朗读编排
//!
//! 对会话中的每一行依次执行：请求合成音频 -> 本地播放 -> 等待播放结束。
//! 单行获取失败或播放失败都只记录日志并继续下一行；
//! 取消是协作式的，只在行边界检查。

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AudioClip, AudioOutputPort, NarrationEventsPort, SpeakRequest, VoiceError,
    VoiceSynthesizerPort,
};
use crate::domain::narration::{NarrationEvent, NarrationSession, NarrationStatus};

/// Narrator 配置
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    /// 单行音频请求的超时时间
    pub line_timeout: Duration,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            line_timeout: Duration::from_secs(60),
        }
    }
}

/// 朗读器
pub struct Narrator {
    config: NarratorConfig,
    voice: Arc<dyn VoiceSynthesizerPort>,
    output: Arc<dyn AudioOutputPort>,
    events: Arc<dyn NarrationEventsPort>,
}

impl Narrator {
    pub fn new(
        config: NarratorConfig,
        voice: Arc<dyn VoiceSynthesizerPort>,
        output: Arc<dyn AudioOutputPort>,
        events: Arc<dyn NarrationEventsPort>,
    ) -> Self {
        Self {
            config,
            voice,
            output,
            events,
        }
    }

    /// 朗读整个会话，返回最终状态
    ///
    /// 会话只能朗读一次；非 Idle 会话直接返回当前状态
    pub async fn narrate(&self, session: &mut NarrationSession) -> NarrationStatus {
        let session_id = session.id().to_string();

        if session.status() != NarrationStatus::Idle {
            tracing::warn!(
                session_id = %session_id,
                status = %session.status(),
                "Session already narrated, ignoring"
            );
            return session.status();
        }

        if session.queue().is_empty() {
            tracing::debug!(session_id = %session_id, "Nothing to narrate");
            self.finish(session, NarrationStatus::Completed);
            return session.status();
        }

        if session.is_cancelled() {
            tracing::info!(session_id = %session_id, "Session cancelled before start");
            self.finish(session, NarrationStatus::Stopped);
            return session.status();
        }

        if let Err(e) = session.begin() {
            tracing::error!(session_id = %session_id, error = %e, "Failed to start session");
            return session.status();
        }

        tracing::info!(
            session_id = %session_id,
            language = %session.language(),
            total_lines = session.queue().len(),
            "Narration started"
        );
        self.events.publish(NarrationEvent::SessionStarted {
            session_id: session_id.clone(),
            language: session.language().to_string(),
            total_lines: session.queue().len(),
        });

        while session.cursor() < session.queue().len() {
            if session.is_cancelled() {
                tracing::info!(
                    session_id = %session_id,
                    line_index = session.cursor(),
                    "Cancellation observed, stopping before next line"
                );
                self.finish(session, NarrationStatus::Stopped);
                return session.status();
            }

            let line_index = session.cursor();
            let line = match session.queue().get(line_index) {
                Some(line) => line.to_string(),
                None => {
                    self.finish(session, NarrationStatus::Stopped);
                    return session.status();
                }
            };

            self.events.publish(NarrationEvent::LineStarted {
                session_id: session_id.clone(),
                line_index,
                text: line.clone(),
            });

            match self.fetch_line(&line, session).await {
                Ok(clip) => self.play_line(clip, &session_id, line_index).await,
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        line_index,
                        line = %line,
                        error = %e,
                        "TTS failed for line, skipping"
                    );
                    session.record_failure();
                    self.events.publish(NarrationEvent::LineFailed {
                        session_id: session_id.clone(),
                        line_index,
                        error: e.to_string(),
                    });
                }
            }

            if let Err(e) = session.advance() {
                tracing::error!(session_id = %session_id, error = %e, "Failed to advance cursor");
                self.finish(session, NarrationStatus::Stopped);
                return session.status();
            }
            self.events.publish(NarrationEvent::LineFinished {
                session_id: session_id.clone(),
                line_index,
            });
        }

        self.finish(session, NarrationStatus::Completed);
        session.status()
    }

    /// 请求单行音频（受 line_timeout 约束）
    async fn fetch_line(
        &self,
        line: &str,
        session: &NarrationSession,
    ) -> Result<AudioClip, VoiceError> {
        let request = SpeakRequest {
            text: line.to_string(),
            language: session.language().clone(),
        };

        match tokio::time::timeout(self.config.line_timeout, self.voice.synthesize(request)).await
        {
            Ok(result) => result,
            Err(_) => Err(VoiceError::Timeout),
        }
    }

    /// 播放单行音频；播放错误等同于播放结束
    async fn play_line(&self, clip: AudioClip, session_id: &str, line_index: usize) {
        let audio_size = clip.len();
        match self.output.play(clip).await {
            Ok(()) => {
                tracing::debug!(
                    session_id = %session_id,
                    line_index,
                    audio_size,
                    "Line played"
                );
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    line_index,
                    error = %e,
                    "Playback failed, moving to next line"
                );
            }
        }
    }

    fn finish(&self, session: &mut NarrationSession, status: NarrationStatus) {
        let result = match status {
            NarrationStatus::Stopped => session.stop(),
            // 队列未播完时无法 Completed，退为 Stopped 保证会话终止
            _ => session.complete().or_else(|e| {
                tracing::error!(session_id = %session.id(), error = %e, "Cannot complete session");
                session.stop()
            }),
        };
        if let Err(e) = result {
            tracing::error!(session_id = %session.id(), error = %e, "Failed to finish session");
            return;
        }

        let lines_failed = session.failed_lines().len();
        let lines_played = session.cursor() - lines_failed;

        tracing::info!(
            session_id = %session.id(),
            status = %session.status(),
            lines_played,
            lines_failed,
            "Narration finished"
        );
        self.events.publish(NarrationEvent::SessionFinished {
            session_id: session.id().to_string(),
            status: session.status(),
            lines_played,
            lines_failed,
        });
    }
}
