//! Narration Manager Port - 朗读会话生命周期管理
//!
//! 保证同一时间只有一个会话占用音频输出，具体实现在 infrastructure/memory 层

use serde::Deserialize;
use thiserror::Error;

use crate::domain::narration::{NarrationRequest, SessionSnapshot};

/// Narration Manager 错误
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Another narration is in progress: {0}")]
    Busy(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("No active narration")]
    NoActiveSession,
}

/// 已有会话在播放时启动新会话的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// 取消旧会话，待其完全结束后再开始新会话
    #[default]
    Replace,
    /// 拒绝新会话
    Reject,
}

/// Narration Manager Port
pub trait NarrationManagerPort: Send + Sync {
    /// 创建并在后台启动新会话
    fn start(&self, request: NarrationRequest) -> Result<SessionSnapshot, ManagerError>;

    /// 取消指定会话；未指定时取消当前活跃会话
    fn stop(&self, session_id: Option<&str>) -> Result<SessionSnapshot, ManagerError>;

    /// 查询会话快照
    fn get(&self, session_id: &str) -> Option<SessionSnapshot>;

    /// 最近启动的会话
    fn current(&self) -> Option<SessionSnapshot>;

    /// 取消所有未结束的会话
    fn shutdown(&self);
}
