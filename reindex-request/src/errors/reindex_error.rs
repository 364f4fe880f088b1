//! Reindex error types.
//!
//! This module defines the unified error type for everything that can stop a
//! reindex request from being turned into dispatched slices: an invalid
//! request, a malformed slice, a slice count over the configured ceiling, a
//! failed dispatch or a request that could not be (de)serialized.

use reindex_shared::SliceError;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Unified errors from reindex request handling.
///
/// Used by the slicing functions, `ReindexService` and the `SliceDispatcher`
/// trait. Validation and slice errors are configuration mistakes and are never
/// worth retrying; dispatch errors come from the execution engine.
#[derive(Debug, Clone, Error)]
pub enum ReindexError {
    /// The request failed validation. Carries every failure, not just the first.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A slice id/total pair was malformed.
    #[error("Slice error: {0}")]
    Slice(#[from] SliceError),

    /// More slices were requested than the configuration allows.
    #[error("Requested {requested} slices but at most {max} are allowed")]
    TooManySlices { requested: u32, max: u32 },

    /// The execution engine rejected a sub-request.
    #[error("Dispatch error: {0}")]
    DispatchError(String),

    /// A request could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ReindexError {
    /// Create a too many slices error.
    pub fn too_many_slices(requested: u32, max: u32) -> Self {
        Self::TooManySlices { requested, max }
    }

    /// Create a dispatch error.
    pub fn dispatch(msg: impl Into<String>) -> Self {
        Self::DispatchError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Whether the error means the request itself must be changed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Slice(_) | Self::TooManySlices { .. }
        )
    }
}
