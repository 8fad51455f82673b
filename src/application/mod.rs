//! 应用层 - 用例编排
//!
//! 包含：
//! - narrator: 逐行朗读编排
//! - ports: 六边形架构端口定义（VoiceSynthesizer、AudioOutput、Summarizer、NarrationManager 等）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod narrator;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Narration commands
    StartNarrationCommand,
    StopNarrationCommand,
    // Summary commands
    SummarizeVideoCommand,
    SummarizeVideoResponse,
    // Handlers
    handlers::{StartNarrationHandler, StopNarrationHandler, SummarizeVideoHandler},
};

pub use error::ApplicationError;

pub use narrator::{Narrator, NarratorConfig};

pub use ports::{
    // Audio output
    AudioOutputPort,
    PlaybackError,
    // Events
    NarrationEventsPort,
    // Narration manager
    BusyPolicy,
    ManagerError,
    NarrationManagerPort,
    // Summarizer
    SummarizerPort,
    SummaryError,
    VideoSummary,
    // Voice synthesizer
    AudioClip,
    SpeakRequest,
    VoiceError,
    VoiceSynthesizerPort,
};

pub use queries::{handlers::GetNarrationStatusHandler, GetNarrationStatus};
