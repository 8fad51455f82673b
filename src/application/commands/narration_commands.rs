//! Narration Commands - 朗读相关命令

/// 开始朗读命令
///
/// 按 BusyPolicy 处理已有会话
#[derive(Debug, Clone)]
pub struct StartNarrationCommand {
    pub text: String,
    pub language: String,
}

/// 停止朗读命令
///
/// session_id 为空时停止当前会话
#[derive(Debug, Clone, Default)]
pub struct StopNarrationCommand {
    pub session_id: Option<String>,
}
