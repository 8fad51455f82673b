//! Tubecast - 本地朗读服务
//!
//! 启动顺序: 配置 -> 日志 -> 适配器 -> Narrator -> NarrationManager -> HTTP

use std::sync::Arc;

use tubecast::application::{
    AudioOutputPort, Narrator, NarratorConfig, NarrationManagerPort, PlaybackError,
    VoiceSynthesizerPort,
};
use tubecast::config::{load_config, print_config, AppConfig};
use tubecast::infrastructure::adapters::{
    CommandAudioOutput, CommandAudioOutputConfig, HttpSummaryClient, HttpSummaryClientConfig,
    HttpVoiceClient, HttpVoiceClientConfig, NullAudioOutput,
};
use tubecast::infrastructure::events::EventPublisher;
use tubecast::infrastructure::http::{AppState, HttpServer};
use tubecast::infrastructure::memory::InMemoryNarrationManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Tubecast - YouTube 摘要朗读服务");
    print_config(&config);

    // 语音后端
    let voice_config = HttpVoiceClientConfig {
        base_url: config.backend.url.clone(),
        speak_path: config.backend.speak_path.clone(),
        timeout_secs: config.backend.timeout_secs,
        max_retries: config.backend.max_retries,
    };
    let voice = Arc::new(HttpVoiceClient::new(voice_config)?);
    if !voice.health_check().await {
        tracing::warn!(url = %config.backend.url, "Backend is not reachable yet");
    }

    // 摘要后端
    let summary_config = HttpSummaryClientConfig {
        base_url: config.backend.url.clone(),
        summarize_path: config.backend.summarize_path.clone(),
        timeout_secs: config.backend.timeout_secs,
    };
    let summarizer = Arc::new(HttpSummaryClient::new(summary_config)?);

    let output = create_audio_output(&config)?;

    let event_publisher = Arc::new(EventPublisher::new());

    let narrator = Arc::new(Narrator::new(
        NarratorConfig {
            line_timeout: config.narration.line_timeout(),
        },
        voice,
        output,
        event_publisher.clone(),
    ));

    let manager = Arc::new(InMemoryNarrationManager::new(
        narrator,
        config.narration.on_busy,
    ));

    let state = AppState::new(manager.clone(), summarizer, event_publisher);
    let server = HttpServer::new(config.server.clone(), state);

    // 启动服务器（带优雅关闭）
    let shutdown_manager = manager.clone();
    server
        .run_with_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
            shutdown_manager.shutdown();
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},tubecast={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 创建音频输出；找不到播放器时退化为静音输出
fn create_audio_output(config: &AppConfig) -> anyhow::Result<Arc<dyn AudioOutputPort>> {
    if config.playback.is_muted() {
        tracing::info!("Audio output disabled");
        return Ok(Arc::new(NullAudioOutput::new()));
    }

    let output_config = CommandAudioOutputConfig {
        player: config.playback.player.clone(),
        player_args: config.playback.player_args.clone(),
        file_extension: config.playback.file_extension.clone(),
    };

    match CommandAudioOutput::new(output_config) {
        Ok(output) => Ok(Arc::new(output)),
        Err(PlaybackError::NoPlayer) if config.playback.player.is_none() => {
            tracing::warn!("No audio player found, narration will be silent");
            Ok(Arc::new(NullAudioOutput::new()))
        }
        Err(e) => Err(e.into()),
    }
}
