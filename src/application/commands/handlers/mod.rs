//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod narration_command_handlers;
mod summary_command_handlers;

pub use narration_command_handlers::*;
pub use summary_command_handlers::*;
