//! Memory Layer - In-Memory State Management
//!
//! 实现 NarrationManager，管理朗读会话的内存状态

mod narration_manager;

pub use narration_manager::InMemoryNarrationManager;
