//! Slice expansion of reindex requests.
//!
//! A request asking for `n` slices becomes `n` sub-requests, one per
//! `(id, n)` partition key. Sub-requests are independent copies of the parent;
//! only the slice, the worker count and the per-operation budgets differ.

use reindex_shared::{SliceError, SliceSpec, TaskId, DEFAULT_SLICE_FIELD};
use tracing::info;

use crate::config::ReindexConfig;
use crate::errors::ReindexError;
use crate::request::ReindexRequest;

/// Derive the sub-request for slice `slice_id` of `total_slices` on the default slice field.
///
/// The request should already have passed validation. The result carries the
/// parent's script, destination, remote source and every other source field,
/// with:
///
/// - `source.slice` set to `(slice_id, total_slices)`
/// - `slices` set to 1, so the sub-request is not sliced again
/// - `requests_per_second` divided evenly between the slices
/// - `max_docs` split so the slices add up to the parent, lower ids taking the
///   remainder. This differs from plain `max_docs / total_slices` on every
///   slice, which would drop the remainder.
/// - `should_store_result` cleared, since only the parent stores a result
///
/// # Returns
///
/// * `Ok(ReindexRequest)` - The sub-request
/// * `Err(SliceError)` - If `total_slices` is 0 or `slice_id >= total_slices`
pub fn for_slice(
    request: &ReindexRequest,
    slice_id: u32,
    total_slices: u32,
) -> Result<ReindexRequest, SliceError> {
    for_slice_on_field(request, DEFAULT_SLICE_FIELD, slice_id, total_slices)
}

/// Like [`for_slice`] but partitioning on `field`.
pub fn for_slice_on_field(
    request: &ReindexRequest,
    field: &str,
    slice_id: u32,
    total_slices: u32,
) -> Result<ReindexRequest, SliceError> {
    let slice = SliceSpec::with_field(field, slice_id, total_slices)?;

    let mut sliced = request.clone();
    sliced.source.slice = Some(slice);
    sliced.slices = 1;
    sliced.should_store_result = false;
    sliced.requests_per_second = request
        .requests_per_second
        .map(|rps| rps / total_slices as f32);
    sliced.max_docs = request
        .max_docs
        .map(|max_docs| split_evenly(max_docs, slice_id, total_slices));
    Ok(sliced)
}

fn split_evenly(total: u64, slice_id: u32, total_slices: u32) -> u64 {
    let total_slices = u64::from(total_slices);
    let share = total / total_slices;
    if u64::from(slice_id) < total % total_slices {
        share + 1
    } else {
        share
    }
}

/// Validate `request` and split it into dispatchable sub-requests.
///
/// An unsliced request (`slices == 1`), including one carrying its own
/// explicit slice, comes back unchanged as the only element. Otherwise the
/// result holds one sub-request per slice, in slice id order, each pointing
/// at `slicing_task` as its parent.
///
/// Nothing is returned for an invalid request: validation failures come back
/// as one aggregate error.
///
/// # Returns
///
/// * `Ok(Vec<ReindexRequest>)` - The sub-requests to dispatch
/// * `Err(ReindexError::Validation)` - If the request is invalid
/// * `Err(ReindexError::TooManySlices)` - If the configured slice ceiling is exceeded
pub fn slice_into_sub_requests(
    request: &ReindexRequest,
    slicing_task: &TaskId,
    config: &ReindexConfig,
) -> Result<Vec<ReindexRequest>, ReindexError> {
    request.validate()?;

    if let Some(max) = config.max_slices {
        if request.slices > max {
            return Err(ReindexError::too_many_slices(request.slices, max));
        }
    }

    if !request.is_sliced() {
        return Ok(vec![request.clone()]);
    }

    let sub_requests = (0..request.slices)
        .map(|slice_id| {
            let mut sliced =
                for_slice_on_field(request, &config.slice_field, slice_id, request.slices)?;
            sliced.parent_task = Some(slicing_task.clone());
            Ok(sliced)
        })
        .collect::<Result<Vec<_>, ReindexError>>()?;

    info!(
        slicing_task = %slicing_task,
        slices = request.slices,
        slice_field = %config.slice_field,
        "Split reindex request into sliced sub-requests"
    );

    Ok(sub_requests)
}
