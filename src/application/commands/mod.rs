//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod narration_commands;
mod summary_commands;

pub mod handlers;

pub use narration_commands::*;
pub use summary_commands::*;
