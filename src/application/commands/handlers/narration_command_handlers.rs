//! Narration Command Handlers

use std::sync::Arc;

use crate::application::commands::narration_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::NarrationManagerPort;
use crate::domain::narration::{LanguageTag, NarrationRequest, SessionSnapshot};

/// StartNarration Handler - 创建会话并在后台朗读
pub struct StartNarrationHandler {
    manager: Arc<dyn NarrationManagerPort>,
}

impl StartNarrationHandler {
    pub fn new(manager: Arc<dyn NarrationManagerPort>) -> Self {
        Self { manager }
    }

    pub fn handle(&self, cmd: StartNarrationCommand) -> Result<SessionSnapshot, ApplicationError> {
        // 语音后端需要语言标签选择发音
        if cmd.language.trim().is_empty() {
            return Err(ApplicationError::validation("language is required"));
        }

        let request = NarrationRequest::new(cmd.text, LanguageTag::new(cmd.language));
        let snapshot = self.manager.start(request)?;

        tracing::info!(
            session_id = %snapshot.session_id,
            language = %snapshot.language,
            total_lines = snapshot.total_lines,
            "Narration requested"
        );

        Ok(snapshot)
    }
}

/// StopNarration Handler - 协作式取消
pub struct StopNarrationHandler {
    manager: Arc<dyn NarrationManagerPort>,
}

impl StopNarrationHandler {
    pub fn new(manager: Arc<dyn NarrationManagerPort>) -> Self {
        Self { manager }
    }

    pub fn handle(&self, cmd: StopNarrationCommand) -> Result<SessionSnapshot, ApplicationError> {
        let snapshot = self.manager.stop(cmd.session_id.as_deref())?;

        tracing::info!(
            session_id = %snapshot.session_id,
            cursor = snapshot.cursor,
            "Narration stop requested"
        );

        Ok(snapshot)
    }
}
