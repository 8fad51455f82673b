//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    StartNarrationHandler, StopNarrationHandler, SummarizeVideoHandler,
    // Query handlers
    GetNarrationStatusHandler,
    // Ports
    NarrationManagerPort, SummarizerPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub summarize_handler: SummarizeVideoHandler,
    pub start_narration_handler: StartNarrationHandler,
    pub stop_narration_handler: StopNarrationHandler,

    // ========== Query Handlers ==========
    pub narration_status_handler: GetNarrationStatusHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        narration_manager: Arc<dyn NarrationManagerPort>,
        summarizer: Arc<dyn SummarizerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            summarize_handler: SummarizeVideoHandler::new(summarizer, narration_manager.clone()),
            start_narration_handler: StartNarrationHandler::new(narration_manager.clone()),
            stop_narration_handler: StopNarrationHandler::new(narration_manager.clone()),
            narration_status_handler: GetNarrationStatusHandler::new(narration_manager),
            event_publisher,
        }
    }
}
