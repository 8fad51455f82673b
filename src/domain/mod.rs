//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Narration Context: 逐行朗读
//! - Video Context: 视频链接解析

pub mod narration;
pub mod video;
