//! Summary Commands - 视频摘要命令

use crate::domain::narration::SessionSnapshot;

/// 生成视频摘要命令
#[derive(Debug, Clone)]
pub struct SummarizeVideoCommand {
    pub video_url: String,
    /// 摘要完成后立即朗读
    pub narrate: bool,
}

/// 生成视频摘要响应
#[derive(Debug, Clone)]
pub struct SummarizeVideoResponse {
    pub video_id: String,
    pub language: String,
    pub summary: String,
    pub transcript_excerpt: Option<String>,
    pub thumbnail_url: String,
    pub watch_url: String,
    /// narrate = true 时启动的朗读会话
    pub narration: Option<SessionSnapshot>,
    /// 自动朗读未能启动的原因
    pub narration_error: Option<String>,
}
