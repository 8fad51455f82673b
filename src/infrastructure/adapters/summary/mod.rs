//! Summary Adapter - 视频摘要客户端实现

mod http_summary_client;

pub use http_summary_client::{HttpSummaryClient, HttpSummaryClientConfig};
