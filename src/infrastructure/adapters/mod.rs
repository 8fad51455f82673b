//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod playback;
pub mod summary;
pub mod voice;

pub use playback::*;
pub use summary::*;
pub use voice::{FakeVoiceClient, FakeVoiceClientConfig, HttpVoiceClient, HttpVoiceClientConfig};
