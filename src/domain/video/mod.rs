//! Video Context - 视频链接

mod errors;
mod value_objects;

pub use errors::VideoError;
pub use value_objects::{VideoId, VideoUrl};
