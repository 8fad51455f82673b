//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::BusyPolicy;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 本地控制 API 配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 后端服务配置（摘要 + 语音）
    #[serde(default)]
    pub backend: BackendConfig,

    /// 朗读配置
    #[serde(default)]
    pub narration: NarrationConfig,

    /// 播放配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 后端服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// 后端基础 URL
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// 摘要接口路径
    #[serde(default = "default_summarize_path")]
    pub summarize_path: String,

    /// 单行语音接口路径
    #[serde(default = "default_speak_path")]
    pub speak_path: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,

    /// 语音请求网络失败时的最大重试次数
    #[serde(default)]
    pub max_retries: u32,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_summarize_path() -> String {
    "/api/summarize".to_string()
}

fn default_speak_path() -> String {
    "/api/speak-line".to_string()
}

fn default_backend_timeout() -> u64 {
    120
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            summarize_path: default_summarize_path(),
            speak_path: default_speak_path(),
            timeout_secs: default_backend_timeout(),
            max_retries: 0,
        }
    }
}

/// 朗读配置
#[derive(Debug, Clone, Deserialize)]
pub struct NarrationConfig {
    /// 单行语音获取的超时时间（秒）
    #[serde(default = "default_line_timeout")]
    pub line_timeout_secs: u64,

    /// 已有会话在播放时的处理方式
    #[serde(default)]
    pub on_busy: BusyPolicy,
}

fn default_line_timeout() -> u64 {
    60
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            line_timeout_secs: default_line_timeout(),
            on_busy: BusyPolicy::default(),
        }
    }
}

impl NarrationConfig {
    pub fn line_timeout(&self) -> Duration {
        Duration::from_secs(self.line_timeout_secs)
    }
}

/// 播放配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// 外部播放器，未设置时自动探测；"none" 表示不出声
    #[serde(default)]
    pub player: Option<String>,

    /// 覆盖播放器的默认参数
    #[serde(default)]
    pub player_args: Vec<String>,

    /// 临时音频文件后缀
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

fn default_file_extension() -> String {
    "mp3".to_string()
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            player: None,
            player_args: Vec::new(),
            file_extension: default_file_extension(),
        }
    }
}

impl PlaybackConfig {
    /// 是否关闭声音输出
    pub fn is_muted(&self) -> bool {
        self.player
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("none"))
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5070);
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert_eq!(config.backend.speak_path, "/api/speak-line");
        assert_eq!(config.narration.on_busy, BusyPolicy::Replace);
        assert_eq!(config.playback.file_extension, "mp3");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "127.0.0.1:5070");
    }

    #[test]
    fn test_playback_muted() {
        let mut config = PlaybackConfig::default();
        assert!(!config.is_muted());

        config.player = Some("None".to_string());
        assert!(config.is_muted());

        config.player = Some("mpg123".to_string());
        assert!(!config.is_muted());
    }

    #[test]
    fn test_line_timeout() {
        let config = NarrationConfig::default();
        assert_eq!(config.line_timeout(), Duration::from_secs(60));
    }
}
