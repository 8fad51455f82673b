//! Summary Command Handlers

use std::sync::Arc;

use crate::application::commands::summary_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{NarrationManagerPort, SummarizerPort};
use crate::domain::narration::NarrationRequest;
use crate::domain::video::VideoUrl;

/// SummarizeVideo Handler
///
/// 本地校验链接 -> 请求后端摘要 -> （可选）自动开始朗读
pub struct SummarizeVideoHandler {
    summarizer: Arc<dyn SummarizerPort>,
    manager: Arc<dyn NarrationManagerPort>,
}

impl SummarizeVideoHandler {
    pub fn new(
        summarizer: Arc<dyn SummarizerPort>,
        manager: Arc<dyn NarrationManagerPort>,
    ) -> Self {
        Self {
            summarizer,
            manager,
        }
    }

    pub async fn handle(
        &self,
        cmd: SummarizeVideoCommand,
    ) -> Result<SummarizeVideoResponse, ApplicationError> {
        let video_url = VideoUrl::parse(cmd.video_url)?;
        let video_id = video_url.id().clone();

        tracing::info!(video_id = %video_id, "Summarizing video");

        let summary = self.summarizer.summarize(&video_url).await?;

        // 后端返回的 video_id 与本地解析结果不一致时以本地为准
        if let Some(remote_id) = summary.video_id.as_deref() {
            if remote_id != video_id.as_str() {
                tracing::warn!(
                    video_id = %video_id,
                    remote_id = %remote_id,
                    "Backend reported a different video id"
                );
            }
        }

        // 自动朗读失败（如 Reject 策略下正忙）不影响摘要本身
        let (narration, narration_error) = if cmd.narrate {
            let request = NarrationRequest::new(summary.summary.clone(), summary.language.clone());
            match self.manager.start(request) {
                Ok(snapshot) => (Some(snapshot), None),
                Err(e) => {
                    tracing::warn!(video_id = %video_id, error = %e, "Auto narration not started");
                    (None, Some(ApplicationError::from(e).to_string()))
                }
            }
        } else {
            (None, None)
        };

        tracing::info!(
            video_id = %video_id,
            language = %summary.language,
            summary_len = summary.summary.len(),
            narrating = narration.is_some(),
            "Video summarized"
        );

        Ok(SummarizeVideoResponse {
            thumbnail_url: video_id.thumbnail_url(),
            watch_url: video_id.watch_url(),
            video_id: video_id.to_string(),
            language: summary.language.to_string(),
            summary: summary.summary,
            transcript_excerpt: summary.transcript_excerpt,
            narration,
            narration_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::{ManagerError, SummaryError, VideoSummary};
    use crate::domain::narration::{NarrationSession, SessionSnapshot};

    struct StubSummarizer {
        result: Mutex<Option<Result<VideoSummary, SummaryError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubSummarizer {
        fn returning(result: Result<VideoSummary, SummaryError>) -> Self {
            Self {
                result: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SummarizerPort for StubSummarizer {
        async fn summarize(&self, video_url: &VideoUrl) -> Result<VideoSummary, SummaryError> {
            self.calls.lock().unwrap().push(video_url.as_str().to_string());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(SummaryError::Timeout))
        }
    }

    #[derive(Default)]
    struct StubManager {
        started: Mutex<Vec<NarrationRequest>>,
        /// 设置后 start 返回 Busy
        busy_with: Option<String>,
    }

    impl NarrationManagerPort for StubManager {
        fn start(&self, request: NarrationRequest) -> Result<SessionSnapshot, ManagerError> {
            if let Some(active) = &self.busy_with {
                return Err(ManagerError::Busy(active.clone()));
            }
            let snapshot = NarrationSession::new(request.clone()).snapshot();
            self.started.lock().unwrap().push(request);
            Ok(snapshot)
        }

        fn stop(&self, _session_id: Option<&str>) -> Result<SessionSnapshot, ManagerError> {
            Err(ManagerError::NoActiveSession)
        }

        fn get(&self, _session_id: &str) -> Option<SessionSnapshot> {
            None
        }

        fn current(&self) -> Option<SessionSnapshot> {
            None
        }

        fn shutdown(&self) {}
    }

    fn summary() -> VideoSummary {
        VideoSummary {
            video_id: Some("dQw4w9WgXcQ".to_string()),
            language: crate::domain::narration::LanguageTag::new("hi"),
            transcript_excerpt: Some("...".to_string()),
            summary: "- point one\n- point two".to_string(),
        }
    }

    #[tokio::test]
    async fn test_summarize_without_narration() {
        let summarizer = Arc::new(StubSummarizer::returning(Ok(summary())));
        let manager = Arc::new(StubManager::default());
        let handler = SummarizeVideoHandler::new(summarizer.clone(), manager.clone());

        let result = handler
            .handle(SummarizeVideoCommand {
                video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                narrate: false,
            })
            .await
            .unwrap();

        assert_eq!(result.video_id, "dQw4w9WgXcQ");
        assert_eq!(result.language, "hi");
        assert_eq!(result.thumbnail_url, "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg");
        assert!(result.narration.is_none());
        assert!(manager.started.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_and_narrate_in_detected_language() {
        let summarizer = Arc::new(StubSummarizer::returning(Ok(summary())));
        let manager = Arc::new(StubManager::default());
        let handler = SummarizeVideoHandler::new(summarizer, manager.clone());

        let result = handler
            .handle(SummarizeVideoCommand {
                video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                narrate: true,
            })
            .await
            .unwrap();

        assert!(result.narration_error.is_none());
        let narration = result.narration.unwrap();
        assert_eq!(narration.total_lines, 2);
        assert_eq!(narration.language, "hi");

        let started = manager.started.lock().unwrap();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].language().as_str(), "hi");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_backend_call() {
        let summarizer = Arc::new(StubSummarizer::returning(Ok(summary())));
        let manager = Arc::new(StubManager::default());
        let handler = SummarizeVideoHandler::new(summarizer.clone(), manager);

        let err = handler
            .handle(SummarizeVideoCommand {
                video_url: "https://example.com/video".to_string(),
                narrate: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(summarizer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_surfaced() {
        let summarizer = Arc::new(StubSummarizer::returning(Err(SummaryError::Rejected {
            status: 403,
            detail: "Transcripts are disabled for this video.".to_string(),
        })));
        let manager = Arc::new(StubManager::default());
        let handler = SummarizeVideoHandler::new(summarizer, manager.clone());

        let err = handler
            .handle(SummarizeVideoCommand {
                video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                narrate: true,
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation error: Transcripts are disabled for this video."
        );
        assert!(manager.started.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_busy_narrator_keeps_summary() {
        let summarizer = Arc::new(StubSummarizer::returning(Ok(summary())));
        let manager = Arc::new(StubManager {
            busy_with: Some("old".to_string()),
            ..Default::default()
        });
        let handler = SummarizeVideoHandler::new(summarizer, manager);

        let result = handler
            .handle(SummarizeVideoCommand {
                video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
                narrate: true,
            })
            .await
            .unwrap();

        assert_eq!(result.summary, "- point one\n- point two");
        assert!(result.narration.is_none());
        assert_eq!(
            result.narration_error.as_deref(),
            Some("Conflict: Another narration is in progress: old")
        );
    }
}
