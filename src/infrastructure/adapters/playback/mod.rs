//! Playback Adapter - 本地音频输出实现

mod command_output;
mod null_output;

pub use command_output::{CommandAudioOutput, CommandAudioOutputConfig};
pub use null_output::NullAudioOutput;
