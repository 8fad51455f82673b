//! Narration Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::NarrationManagerPort;
use crate::application::queries::GetNarrationStatus;
use crate::domain::narration::SessionSnapshot;

/// 获取朗读状态
pub struct GetNarrationStatusHandler {
    manager: Arc<dyn NarrationManagerPort>,
}

impl GetNarrationStatusHandler {
    pub fn new(manager: Arc<dyn NarrationManagerPort>) -> Self {
        Self { manager }
    }

    pub fn handle(&self, query: GetNarrationStatus) -> Result<SessionSnapshot, ApplicationError> {
        match query.session_id {
            Some(id) => self
                .manager
                .get(&id)
                .ok_or_else(|| ApplicationError::not_found("Session", id)),
            None => self
                .manager
                .current()
                .ok_or_else(|| ApplicationError::not_found("Session", "current")),
        }
    }
}
