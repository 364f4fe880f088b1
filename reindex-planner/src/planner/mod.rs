//! Planner module for the reindex planner.
//!
//! Loads a serialized reindex request and submits it through the
//! `ReindexService`, which validates it, slices it and hands every
//! sub-request to the dispatcher.

use std::path::{Path, PathBuf};

use reindex_request::{DispatchSummary, ReindexRequest, ReindexService};
use reindex_shared::TaskId;
use tracing::{info, instrument, warn};

use crate::errors::PlanError;

/// Plans one reindex request read from a file.
pub struct Planner {
    service: ReindexService,
    slicing_task: TaskId,
    request_path: PathBuf,
}

impl Planner {
    /// Create a planner for the request stored at `request_path`.
    ///
    /// `slicing_task` is recorded as the parent of every sliced sub-request.
    pub fn new(service: ReindexService, slicing_task: TaskId, request_path: PathBuf) -> Self {
        Self {
            service,
            slicing_task,
            request_path,
        }
    }

    pub fn request_path(&self) -> &Path {
        &self.request_path
    }

    /// Read the request file and plan it.
    #[instrument(skip(self), fields(request_path = %self.request_path.display()))]
    pub async fn run(&self) -> Result<DispatchSummary, PlanError> {
        let bytes = tokio::fs::read(&self.request_path).await.map_err(|e| {
            PlanError::read(format!(
                "Failed to read {}: {}",
                self.request_path.display(),
                e
            ))
        })?;
        self.plan(&bytes).await
    }

    /// Deserialize a request and submit it.
    ///
    /// # Returns
    ///
    /// * `Ok(DispatchSummary)` - Every sub-request was dispatched
    /// * `Err(PlanError::Reindex)` - The request could not be parsed or is invalid
    /// * `Err(PlanError::DispatchFailed)` - Some sub-requests were rejected
    pub async fn plan(&self, bytes: &[u8]) -> Result<DispatchSummary, PlanError> {
        let request = ReindexRequest::from_json_slice(bytes)?;

        info!(
            indices = ?request.source.indices,
            destination = ?request.destination.index,
            slices = request.slices,
            remote = request.remote_info.is_some(),
            "Loaded reindex request"
        );

        let summary = self.service.submit(&request, &self.slicing_task).await?;

        if !summary.all_succeeded() {
            warn!(
                failed = summary.failed,
                total = summary.total,
                "Some sub-requests failed to dispatch"
            );
            return Err(PlanError::DispatchFailed {
                failed: summary.failed,
                total: summary.total,
            });
        }

        Ok(summary)
    }
}
