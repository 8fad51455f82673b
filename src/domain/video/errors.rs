//! Video Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("video URL is empty")]
    EmptyUrl,

    #[error("not a recognized YouTube video URL: {0}")]
    Unrecognized(String),
}
