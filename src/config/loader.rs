//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "TUBECAST";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `TUBECAST_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `TUBECAST_SERVER__PORT=8080`
/// - `TUBECAST_BACKEND__URL=http://backend:8000`
/// - `TUBECAST_NARRATION__ON_BUSY=reject`
/// - `TUBECAST_PLAYBACK__PLAYER=none`
/// - `TUBECAST_PLAYBACK__PLAYER_ARGS="-q --no-control"`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5070)?
        .set_default("backend.url", "http://localhost:8000")?
        .set_default("backend.summarize_path", "/api/summarize")?
        .set_default("backend.speak_path", "/api/speak-line")?
        .set_default("backend.timeout_secs", 120)?
        .set_default("backend.max_retries", 0)?
        .set_default("narration.line_timeout_secs", 60)?
        .set_default("narration.on_busy", "replace")?
        .set_default("playback.file_extension", "mp3")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: TUBECAST_BACKEND__URL=http://backend:8000
    // 列表以空格分隔: TUBECAST_PLAYBACK__PLAYER_ARGS="-q --no-control"
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("playback.player_args"),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.backend.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Backend URL cannot be empty".to_string(),
        ));
    }

    for (name, path) in [
        ("summarize_path", &config.backend.summarize_path),
        ("speak_path", &config.backend.speak_path),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "Backend {} must start with '/': {}",
                name, path
            )));
        }
    }

    if config.narration.line_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Line timeout cannot be 0".to_string(),
        ));
    }

    if config.playback.file_extension.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Playback file extension cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Backend URL: {}", config.backend.url);
    tracing::info!("Summarize Path: {}", config.backend.summarize_path);
    tracing::info!("Speak Path: {}", config.backend.speak_path);
    tracing::info!("Backend Timeout: {}s", config.backend.timeout_secs);
    tracing::info!("Line Timeout: {}s", config.narration.line_timeout_secs);
    tracing::info!("On Busy: {:?}", config.narration.on_busy);
    match &config.playback.player {
        Some(player) => tracing::info!("Player: {}", player),
        None => tracing::info!("Player: auto"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::BusyPolicy;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let file = write_config(
            r#"
[server]
port = 6000

[backend]
url = "http://backend:9000"

[narration]
on_busy = "reject"
line_timeout_secs = 5

[playback]
player = "none"
"#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.backend.url, "http://backend:9000");
        assert_eq!(config.backend.speak_path, "/api/speak-line");
        assert_eq!(config.narration.on_busy, BusyPolicy::Reject);
        assert_eq!(config.narration.line_timeout_secs, 5);
        assert!(config.playback.is_muted());
    }

    #[test]
    fn test_player_args_from_environment() {
        let file = write_config("");
        std::env::set_var("TUBECAST_PLAYBACK__PLAYER_ARGS", "-q --no-control");

        let config = load_config_from_path(Some(file.path()));
        std::env::remove_var("TUBECAST_PLAYBACK__PLAYER_ARGS");

        assert_eq!(
            config.unwrap().playback.player_args,
            vec!["-q".to_string(), "--no-control".to_string()]
        );
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let file = write_config(
            r#"
[narration]
line_timeout_secs = 0
"#,
        );

        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_config_from_path(Some(Path::new("/nonexistent/tubecast.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_backend_url() {
        let mut config = AppConfig::default();
        config.backend.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_relative_path() {
        let mut config = AppConfig::default();
        config.backend.speak_path = "api/speak-line".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_extension() {
        let mut config = AppConfig::default();
        config.playback.file_extension = " ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
