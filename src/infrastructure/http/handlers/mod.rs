//! HTTP Handlers

mod narration;
mod ping;
mod summary;
mod websocket;

pub use narration::*;
pub use ping::*;
pub use summary::*;
pub use websocket::*;
