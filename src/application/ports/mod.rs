//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_output;
mod narration_events;
mod narration_manager;
mod summarizer;
mod voice_synthesizer;

pub use audio_output::{AudioOutputPort, PlaybackError};
pub use narration_events::NarrationEventsPort;
pub use narration_manager::{BusyPolicy, ManagerError, NarrationManagerPort};
pub use summarizer::{SummarizerPort, SummaryError, VideoSummary};
pub use voice_synthesizer::{AudioClip, SpeakRequest, VoiceError, VoiceSynthesizerPort};
