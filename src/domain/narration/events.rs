//! Narration Context - Domain Events

use serde::{Deserialize, Serialize};

use super::NarrationStatus;

/// 朗读事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum NarrationEvent {
    /// 会话开始
    SessionStarted {
        session_id: String,
        language: String,
        total_lines: usize,
    },
    /// 开始处理某一行
    LineStarted {
        session_id: String,
        line_index: usize,
        text: String,
    },
    /// 某一行获取音频失败（已跳过）
    LineFailed {
        session_id: String,
        line_index: usize,
        error: String,
    },
    /// 某一行处理结束
    LineFinished {
        session_id: String,
        line_index: usize,
    },
    /// 会话结束（Completed 或 Stopped）
    SessionFinished {
        session_id: String,
        status: NarrationStatus,
        lines_played: usize,
        lines_failed: usize,
    },
}

impl NarrationEvent {
    pub fn session_id(&self) -> &str {
        match self {
            Self::SessionStarted { session_id, .. }
            | Self::LineStarted { session_id, .. }
            | Self::LineFailed { session_id, .. }
            | Self::LineFinished { session_id, .. }
            | Self::SessionFinished { session_id, .. } => session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = NarrationEvent::LineFailed {
            session_id: "s1".to_string(),
            line_index: 2,
            error: "HTTP 500".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "LineFailed");
        assert_eq!(json["data"]["line_index"], 2);
        assert_eq!(event.session_id(), "s1");
    }
}
