//! Tubecast - YouTube 视频摘要与逐行语音朗读
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Narration Context: 朗读会话、行队列、状态机
//! - Video Context: 视频链接解析
//!
//! 应用层 (application/):
//! - Narrator: 逐行获取语音并顺序播放
//! - Ports: 端口定义（VoiceSynthesizer, AudioOutput, Summarizer, NarrationManager, NarrationEvents）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 本地控制 API + WebSocket
//! - Memory: NarrationManager 内存实现
//! - Adapters: Voice / Summary HTTP 客户端，外部播放器
//! - Events: 朗读事件广播

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
