//! Narration Context - 朗读限界上下文
//!
//! 职责:
//! - 文本拆行（LineQueue）
//! - 朗读会话状态机
//! - 朗读事件

mod errors;
mod events;
mod line_queue;
mod session;
mod value_objects;

pub use errors::NarrationError;
pub use events::NarrationEvent;
pub use line_queue::LineQueue;
pub use session::{CancelHandle, NarrationSession, NarrationStatus, SessionSnapshot};
pub use value_objects::{LanguageTag, NarrationRequest, SessionId};
