//! Narration Queries - 朗读状态查询

/// 查询朗读会话状态
///
/// session_id 为空时查询最近启动的会话
#[derive(Debug, Clone, Default)]
pub struct GetNarrationStatus {
    pub session_id: Option<String>,
}
