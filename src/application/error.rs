//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ManagerError, SummaryError};
use crate::domain::video::VideoError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源冲突（已有会话在播放）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<ManagerError> for ApplicationError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Busy(id) => {
                Self::Conflict(format!("Another narration is in progress: {}", id))
            }
            ManagerError::NotFound(id) => Self::not_found("Session", id),
            ManagerError::NoActiveSession => Self::not_found("Session", "active"),
        }
    }
}

impl From<VideoError> for ApplicationError {
    fn from(err: VideoError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<SummaryError> for ApplicationError {
    fn from(err: SummaryError) -> Self {
        match err {
            // 后端对无效链接/无字幕返回 4xx，属于调用方输入问题
            SummaryError::Rejected { status, detail } if (400..500).contains(&status) => {
                Self::validation(detail)
            }
            other => Self::ExternalServiceError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rejection_mapping() {
        let err: ApplicationError = SummaryError::Rejected {
            status: 404,
            detail: "Transcript not found.".to_string(),
        }
        .into();
        assert!(matches!(err, ApplicationError::ValidationError(ref m) if m == "Transcript not found."));

        let err: ApplicationError = SummaryError::Rejected {
            status: 502,
            detail: "OpenAI API Error".to_string(),
        }
        .into();
        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
    }

    #[test]
    fn test_manager_error_mapping() {
        let err: ApplicationError = ManagerError::Busy("s1".to_string()).into();
        assert!(matches!(err, ApplicationError::Conflict(_)));

        let err: ApplicationError = ManagerError::NotFound("s2".to_string()).into();
        assert_eq!(err.to_string(), "Session not found: s2");
    }
}
