//! In-Memory Narration Manager Implementation

use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::ports::{BusyPolicy, ManagerError, NarrationManagerPort};
use crate::application::Narrator;
use crate::domain::narration::{CancelHandle, NarrationRequest, NarrationSession, SessionSnapshot};

/// 已登记的会话
struct SessionEntry {
    cancel: CancelHandle,
    progress: watch::Receiver<SessionSnapshot>,
}

impl SessionEntry {
    fn snapshot(&self) -> SessionSnapshot {
        self.progress.borrow().clone()
    }
}

/// 最近启动的朗读任务
struct LatestTask {
    session_id: String,
    handle: JoinHandle<()>,
}

/// 内存朗读管理器
///
/// 同一时间只有一个会话在播放：Replace 策略下新会话的任务
/// 会先等待旧任务结束再开始
pub struct InMemoryNarrationManager {
    narrator: Arc<Narrator>,
    policy: BusyPolicy,
    /// session_id -> SessionEntry
    sessions: DashMap<String, SessionEntry>,
    latest: Mutex<Option<LatestTask>>,
}

impl InMemoryNarrationManager {
    pub fn new(narrator: Arc<Narrator>, policy: BusyPolicy) -> Self {
        Self {
            narrator,
            policy,
            sessions: DashMap::new(),
            latest: Mutex::new(None),
        }
    }

    fn latest(&self) -> MutexGuard<'_, Option<LatestTask>> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 移除已结束的会话
    fn prune_finished(&self) {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| !entry.progress.borrow().status.is_terminal());
        let removed = before - self.sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "Finished sessions pruned");
        }
    }
}

impl NarrationManagerPort for InMemoryNarrationManager {
    fn start(&self, request: NarrationRequest) -> Result<SessionSnapshot, ManagerError> {
        let mut latest = self.latest();

        let predecessor = match latest.take() {
            Some(prev) if !prev.handle.is_finished() => match self.policy {
                BusyPolicy::Reject => {
                    let busy_id = prev.session_id.clone();
                    *latest = Some(prev);
                    return Err(ManagerError::Busy(busy_id));
                }
                BusyPolicy::Replace => {
                    if let Some(entry) = self.sessions.get(&prev.session_id) {
                        entry.cancel.cancel();
                    }
                    tracing::info!(session_id = %prev.session_id, "Replacing active narration");
                    Some(prev.handle)
                }
            },
            _ => None,
        };

        self.prune_finished();

        let mut session = NarrationSession::new(request);
        let session_id = session.id().to_string();
        let snapshot = session.snapshot();
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                cancel: session.cancel_handle(),
                progress: session.subscribe(),
            },
        );

        let narrator = self.narrator.clone();
        let handle = tokio::spawn(async move {
            if let Some(previous) = predecessor {
                // 旧会话在行边界停止后才开始，避免音频重叠
                if let Err(e) = previous.await {
                    tracing::warn!(error = %e, "Previous narration task ended abnormally");
                }
            }
            narrator.narrate(&mut session).await;
        });

        tracing::info!(session_id = %session_id, total_lines = snapshot.total_lines, "Session created");

        *latest = Some(LatestTask {
            session_id,
            handle,
        });

        Ok(snapshot)
    }

    fn stop(&self, session_id: Option<&str>) -> Result<SessionSnapshot, ManagerError> {
        let session_id = match session_id {
            Some(id) => id.to_string(),
            None => self
                .latest()
                .as_ref()
                .map(|task| task.session_id.clone())
                .ok_or(ManagerError::NoActiveSession)?,
        };

        let entry = self
            .sessions
            .get(&session_id)
            .ok_or_else(|| ManagerError::NotFound(session_id.clone()))?;

        entry.cancel.cancel();
        tracing::info!(session_id = %session_id, "Session cancellation requested");

        Ok(entry.snapshot())
    }

    fn get(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.sessions.get(session_id).map(|entry| entry.snapshot())
    }

    fn current(&self) -> Option<SessionSnapshot> {
        let session_id = self.latest().as_ref().map(|task| task.session_id.clone())?;
        self.get(&session_id)
    }

    fn shutdown(&self) {
        for entry in self.sessions.iter() {
            entry.cancel.cancel();
        }
        tracing::info!(sessions = self.sessions.len(), "All narrations cancelled");
    }
}
