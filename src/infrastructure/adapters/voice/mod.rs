//! Voice Adapter - 语音合成客户端实现

mod fake_voice_client;
mod http_voice_client;

pub use fake_voice_client::{FakeVoiceClient, FakeVoiceClientConfig};
pub use http_voice_client::{HttpVoiceClient, HttpVoiceClientConfig};

pub(crate) use http_voice_client::error_detail;
