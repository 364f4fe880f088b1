//! Result types for dispatching sliced reindex requests.

use crate::errors::ReindexError;

/// Outcome of dispatching one sub-request.
#[derive(Debug, Clone)]
pub struct SliceDispatchResult {
    /// Slice id of the sub-request, `None` for an unsliced request.
    pub slice_id: Option<u32>,
    /// Whether the dispatcher accepted the sub-request.
    pub success: bool,
    /// Error if the dispatch failed.
    pub error: Option<ReindexError>,
}

/// Summary of dispatching every sub-request of one reindex request.
///
/// Lets callers see which slices were accepted when only some of them fail.
#[derive(Debug, Clone)]
pub struct DispatchSummary {
    /// Total number of sub-requests dispatched.
    pub total: usize,
    /// Number of accepted sub-requests.
    pub succeeded: usize,
    /// Number of rejected sub-requests.
    pub failed: usize,
    /// Individual results, in slice id order.
    pub results: Vec<SliceDispatchResult>,
}

impl DispatchSummary {
    /// Build a summary from per-slice results.
    pub fn from_results(results: Vec<SliceDispatchResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Whether every sub-request was accepted.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
