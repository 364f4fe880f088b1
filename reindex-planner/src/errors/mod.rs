//! Error types for planning a reindex request.

use reindex_request::ReindexError;
use thiserror::Error;

/// Errors that can occur while planning one reindex request.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The request file could not be read.
    #[error("Read error: {0}")]
    ReadError(String),

    /// The request could not be validated, sliced or dispatched.
    #[error(transparent)]
    Reindex(#[from] ReindexError),

    /// One or more sub-requests were rejected by the dispatcher.
    #[error("{failed} of {total} sub-requests failed to dispatch")]
    DispatchFailed { failed: usize, total: usize },
}

impl PlanError {
    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::ReadError(msg.into())
    }
}

