//! Narration Context - 朗读会话
//!
//! 一次逐行朗读的完整状态，由调用方持有，不使用全局可变状态

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::{LanguageTag, LineQueue, NarrationError, NarrationRequest, SessionId};

/// 会话状态
///
/// 状态机: Idle -> Playing -> {Completed, Stopped}
/// 空队列: Idle -> Completed；朗读前已取消: Idle -> Stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationStatus {
    Idle,
    Playing,
    Stopped,
    Completed,
}

impl NarrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        }
    }

    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Completed)
    }

    fn can_transition_to(&self, to: NarrationStatus) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Playing)
                | (Self::Idle, Self::Completed)
                | (Self::Idle, Self::Stopped)
                | (Self::Playing, Self::Completed)
                | (Self::Playing, Self::Stopped)
        )
    }
}

impl std::fmt::Display for NarrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 会话快照（只读视图，用于状态查询和推送）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub status: NarrationStatus,
    pub language: String,
    pub cursor: usize,
    pub total_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_line: Option<String>,
    pub failed_lines: Vec<usize>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// 取消句柄
///
/// 协作式取消：只设置标志，朗读循环在行边界检查
#[derive(Debug, Clone)]
pub struct CancelHandle(CancellationToken);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// 朗读会话
pub struct NarrationSession {
    id: SessionId,
    request: NarrationRequest,
    queue: LineQueue,
    cursor: usize,
    status: NarrationStatus,
    failed_lines: Vec<usize>,
    cancel: CancellationToken,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    progress: watch::Sender<SessionSnapshot>,
}

impl NarrationSession {
    pub fn new(request: NarrationRequest) -> Self {
        let id = SessionId::new();
        let queue = LineQueue::from_text(request.text());
        let started_at = Utc::now();
        let initial = SessionSnapshot {
            session_id: id.to_string(),
            status: NarrationStatus::Idle,
            language: request.language().to_string(),
            cursor: 0,
            total_lines: queue.len(),
            current_line: None,
            failed_lines: Vec::new(),
            started_at,
            finished_at: None,
        };
        let (progress, _) = watch::channel(initial);

        Self {
            id,
            request,
            queue,
            cursor: 0,
            status: NarrationStatus::Idle,
            failed_lines: Vec::new(),
            cancel: CancellationToken::new(),
            started_at,
            finished_at: None,
            progress,
        }
    }

    // Getters
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn language(&self) -> &LanguageTag {
        self.request.language()
    }

    pub fn queue(&self) -> &LineQueue {
        &self.queue
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> NarrationStatus {
        self.status
    }

    pub fn failed_lines(&self) -> &[usize] {
        &self.failed_lines
    }

    /// 当前正在处理的行（仅 Playing 状态下存在）
    pub fn current_line(&self) -> Option<&str> {
        if self.status == NarrationStatus::Playing {
            self.queue.get(self.cursor)
        } else {
            None
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancel.clone())
    }

    /// 请求在下一行开始前停止
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 订阅会话进度
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.progress.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.to_string(),
            status: self.status,
            language: self.request.language().to_string(),
            cursor: self.cursor,
            total_lines: self.queue.len(),
            current_line: self.current_line().map(str::to_string),
            failed_lines: self.failed_lines.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    /// Idle -> Playing
    pub fn begin(&mut self) -> Result<(), NarrationError> {
        self.transition(NarrationStatus::Playing)
    }

    /// 记录当前行失败
    pub fn record_failure(&mut self) {
        if !self.failed_lines.contains(&self.cursor) {
            self.failed_lines.push(self.cursor);
        }
        self.publish();
    }

    /// 当前行结束，游标前移
    pub fn advance(&mut self) -> Result<(), NarrationError> {
        if self.status != NarrationStatus::Playing {
            return Err(NarrationError::InvalidTransition {
                from: self.status,
                to: NarrationStatus::Playing,
            });
        }
        if self.cursor >= self.queue.len() {
            return Err(NarrationError::CursorOutOfRange {
                cursor: self.cursor,
                total: self.queue.len(),
            });
        }
        self.cursor += 1;
        self.publish();
        Ok(())
    }

    /// 所有行处理完毕
    pub fn complete(&mut self) -> Result<(), NarrationError> {
        if self.cursor != self.queue.len() {
            return Err(NarrationError::CursorOutOfRange {
                cursor: self.cursor,
                total: self.queue.len(),
            });
        }
        self.transition(NarrationStatus::Completed)
    }

    /// 观察到取消
    pub fn stop(&mut self) -> Result<(), NarrationError> {
        self.transition(NarrationStatus::Stopped)
    }

    fn transition(&mut self, to: NarrationStatus) -> Result<(), NarrationError> {
        if !self.status.can_transition_to(to) {
            return Err(NarrationError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        if to.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        self.progress.send_replace(self.snapshot());
    }
}

impl std::fmt::Debug for NarrationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationSession")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("cursor", &self.cursor)
            .field("total_lines", &self.queue.len())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
