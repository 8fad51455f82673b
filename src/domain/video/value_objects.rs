//! Video Context - Value Objects

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::VideoError;

/// 匹配 `watch?v=<id>` 与 `youtu.be/<id>` 两种链接
static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|youtu\.be/)([a-zA-Z0-9_-]{11})").expect("video id pattern is valid")
});

/// 视频 ID（11 位）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// 从视频链接中提取 ID
    pub fn extract(url: &str) -> Result<Self, VideoError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(VideoError::EmptyUrl);
        }

        VIDEO_ID_PATTERN
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| VideoError::Unrecognized(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 缩略图地址
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }

    /// 观看页地址
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 经过校验的视频链接
///
/// 不变量: 链接中一定能提取出 VideoId
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl {
    url: String,
    id: VideoId,
}

impl VideoUrl {
    pub fn parse(url: impl Into<String>) -> Result<Self, VideoError> {
        let url = url.into().trim().to_string();
        let id = VideoId::extract(&url)?;
        Ok(Self { url, id })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> &VideoId {
        &self.id
    }
}
