//! Reindex service implementation.
//!
//! This module provides the entry point application code uses to turn a
//! reindex request into dispatched work: validate, slice, hand every slice to
//! the execution engine, and report what happened.

use futures::future::join_all;
use reindex_shared::TaskId;
use tracing::{info, instrument, warn};

use crate::config::ReindexConfig;
use crate::errors::ReindexError;
use crate::interfaces::SliceDispatcher;
use crate::request::ReindexRequest;
use crate::slicing::slice_into_sub_requests;
use crate::types::{DispatchSummary, SliceDispatchResult};

/// The main service for submitting reindex requests.
///
/// Validates each request, splits it into slices according to its worker
/// count, and delegates the sub-requests to a `SliceDispatcher`. An invalid
/// request never reaches the dispatcher.
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use reindex_request::{ReindexError, ReindexRequest, ReindexService, SliceDispatcher};
/// use reindex_shared::{Destination, SearchSource, TaskId};
///
/// struct Engine;
///
/// #[async_trait]
/// impl SliceDispatcher for Engine {
///     async fn dispatch(&self, _request: &ReindexRequest) -> Result<(), ReindexError> {
///         Ok(())
///     }
/// }
///
/// # async fn example() -> Result<(), ReindexError> {
/// let service = ReindexService::new(Box::new(Engine));
/// let request = ReindexRequest::new(SearchSource::new(["source"]), Destination::new("dest"))
///     .with_slices(4);
///
/// let summary = service.submit(&request, &TaskId::new("node-1", 1)).await?;
/// assert_eq!(summary.total, 4);
/// # Ok(())
/// # }
/// ```
pub struct ReindexService {
    dispatcher: Box<dyn SliceDispatcher>,
    config: ReindexConfig,
}

impl ReindexService {
    /// Create a new ReindexService with default configuration.
    ///
    /// The default configuration slices on `_uid` and sets no slice ceiling.
    pub fn new(dispatcher: Box<dyn SliceDispatcher>) -> Self {
        Self {
            dispatcher,
            config: ReindexConfig::default(),
        }
    }

    /// Create a new ReindexService with custom configuration.
    pub fn with_config(dispatcher: Box<dyn SliceDispatcher>, config: ReindexConfig) -> Self {
        Self { dispatcher, config }
    }

    pub fn config(&self) -> &ReindexConfig {
        &self.config
    }

    /// Validate and slice `request` without dispatching anything.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ReindexRequest>)` - The sub-requests that `submit` would dispatch
    /// * `Err(ReindexError)` - If the request is invalid or asks for too many slices
    pub fn plan(
        &self,
        request: &ReindexRequest,
        slicing_task: &TaskId,
    ) -> Result<Vec<ReindexRequest>, ReindexError> {
        slice_into_sub_requests(request, slicing_task, &self.config)
    }

    /// Validate, slice and dispatch `request`.
    ///
    /// Sub-requests are dispatched concurrently. A rejected sub-request does
    /// not stop the others; its error is recorded in the summary.
    ///
    /// # Arguments
    ///
    /// * `request` - The reindex request to run
    /// * `slicing_task` - The task that owns the request and merges slice results
    ///
    /// # Returns
    ///
    /// * `Ok(DispatchSummary)` - Per-slice dispatch results, in slice id order
    /// * `Err(ReindexError)` - If the request is invalid; nothing was dispatched
    #[instrument(
        skip(self, request, slicing_task),
        fields(slicing_task = %slicing_task, slices = request.slices)
    )]
    pub async fn submit(
        &self,
        request: &ReindexRequest,
        slicing_task: &TaskId,
    ) -> Result<DispatchSummary, ReindexError> {
        let sub_requests = self.plan(request, slicing_task)?;

        let outcomes = join_all(
            sub_requests
                .iter()
                .map(|sub_request| self.dispatcher.dispatch(sub_request)),
        )
        .await;

        let results = sub_requests
            .iter()
            .zip(outcomes)
            .map(|(sub_request, outcome)| {
                let slice_id = sub_request.source.slice.as_ref().map(|s| s.id());
                match outcome {
                    Ok(()) => SliceDispatchResult {
                        slice_id,
                        success: true,
                        error: None,
                    },
                    Err(e) => {
                        warn!(slice_id = ?slice_id, error = %e, "Failed to dispatch reindex slice");
                        SliceDispatchResult {
                            slice_id,
                            success: false,
                            error: Some(e),
                        }
                    }
                }
            })
            .collect();

        let summary = DispatchSummary::from_results(results);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Dispatched reindex request"
        );
        Ok(summary)
    }
}
