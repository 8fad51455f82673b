//! Narration Context - Errors

use thiserror::Error;

use super::NarrationStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NarrationError {
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: NarrationStatus,
        to: NarrationStatus,
    },

    #[error("cursor out of range: {cursor} (total lines: {total})")]
    CursorOutOfRange { cursor: usize, total: usize },
}
