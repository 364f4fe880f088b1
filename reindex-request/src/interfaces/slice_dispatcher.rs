//! Slice dispatcher trait definition.
//!
//! This module defines the hook through which validated, sliced sub-requests
//! are handed to whatever executes them (a local worker pool, a remote node,
//! a queue).

use async_trait::async_trait;

use crate::errors::ReindexError;
use crate::request::ReindexRequest;

/// Hands one dispatchable reindex request to the execution engine.
///
/// Implementations are injected into `ReindexService`. Every request passed
/// to `dispatch` has been validated and carries at most one slice; sliced
/// sub-requests name their parent in `parent_task` so the engine can merge
/// their results.
///
/// `dispatch` may be called concurrently for the sub-requests of a single
/// parent.
#[async_trait]
pub trait SliceDispatcher: Send + Sync {
    /// Start executing `request`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine accepted the request
    /// * `Err(ReindexError)` - If the engine rejected it
    async fn dispatch(&self, request: &ReindexRequest) -> Result<(), ReindexError>;
}
