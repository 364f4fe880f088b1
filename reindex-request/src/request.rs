//! The reindex request aggregate.
//!
//! A `ReindexRequest` combines the search that selects documents, the
//! destination they are written to, an optional transform script, an optional
//! remote source, the requested number of slices, and the execution settings
//! handed through to the engine that runs it.

use std::time::Duration;

use reindex_shared::{Destination, RemoteInfo, Script, SearchSource, TaskId};
use serde::{Deserialize, Serialize};

use crate::errors::ReindexError;
use crate::validation::{self, ValidationErrors};

/// Default timeout for each bulk write.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default delay before the first retry of a rejected bulk or search request.
pub const DEFAULT_RETRY_BACKOFF_INITIAL_TIME: Duration = Duration::from_millis(500);

/// Default number of retries of a rejected bulk or search request.
pub const DEFAULT_MAX_RETRIES: u32 = 11;

/// A request to copy documents matched by a search into a destination index.
///
/// The request is plain data. Call [`ReindexRequest::validate`] before
/// dispatching it, and [`crate::slicing::slice_into_sub_requests`] to split it
/// into independently dispatchable slices.
///
/// # Example
///
/// ```
/// use reindex_request::ReindexRequest;
/// use reindex_shared::{Destination, SearchSource};
///
/// let request = ReindexRequest::new(SearchSource::new(["source"]), Destination::new("dest"))
///     .with_slices(4);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReindexRequest {
    pub source: SearchSource,

    pub destination: Destination,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,

    /// When set, documents are read from this cluster instead of the local one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_info: Option<RemoteInfo>,

    /// Number of slices to split the work into. 1 means no slicing.
    #[serde(default = "default_slices")]
    pub slices: u32,

    /// Maximum number of documents to copy. `None` copies every match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_docs: Option<u64>,

    /// Throttle in documents per second. `None` is unthrottled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_second: Option<f32>,

    #[serde(default = "default_true")]
    pub abort_on_version_conflict: bool,

    #[serde(default)]
    pub refresh: bool,

    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_active_shards: Option<u32>,

    #[serde(default = "default_retry_backoff_initial_time")]
    pub retry_backoff_initial_time: Duration,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Whether the task running this request persists its result.
    #[serde(default)]
    pub should_store_result: bool,

    /// The task that sliced this request, if it is a sliced sub-request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<TaskId>,
}

fn default_slices() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_retry_backoff_initial_time() -> Duration {
    DEFAULT_RETRY_BACKOFF_INITIAL_TIME
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl ReindexRequest {
    /// Create an unsliced local request with default execution settings.
    pub fn new(source: SearchSource, destination: Destination) -> Self {
        Self {
            source,
            destination,
            script: None,
            remote_info: None,
            slices: default_slices(),
            max_docs: None,
            requests_per_second: None,
            abort_on_version_conflict: true,
            refresh: false,
            timeout: DEFAULT_TIMEOUT,
            wait_for_active_shards: None,
            retry_backoff_initial_time: DEFAULT_RETRY_BACKOFF_INITIAL_TIME,
            max_retries: DEFAULT_MAX_RETRIES,
            should_store_result: false,
            parent_task: None,
        }
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    pub fn with_remote_info(mut self, remote_info: RemoteInfo) -> Self {
        self.remote_info = Some(remote_info);
        self
    }

    pub fn with_slices(mut self, slices: u32) -> Self {
        self.slices = slices;
        self
    }

    pub fn with_max_docs(mut self, max_docs: u64) -> Self {
        self.max_docs = Some(max_docs);
        self
    }

    /// Throttle the request. `f32::INFINITY` means unthrottled and clears the limit.
    pub fn with_requests_per_second(mut self, requests_per_second: f32) -> Self {
        self.requests_per_second =
            (requests_per_second != f32::INFINITY).then_some(requests_per_second);
        self
    }

    /// Whether the request asks to be split into more than one slice.
    pub fn is_sliced(&self) -> bool {
        self.slices > 1
    }

    /// Check the request and collect every failure.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the request may be dispatched
    /// * `Err(ValidationErrors)` - All failures, in rule order
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ValidationErrors::from(validation::validate(self)).into_result()
    }

    /// Serialize the request for shipping to another node.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ReindexError> {
        serde_json::to_vec(self).map_err(|e| ReindexError::serialization(e.to_string()))
    }

    /// Deserialize a request shipped by [`ReindexRequest::to_json_bytes`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ReindexError> {
        serde_json::from_slice(bytes).map_err(|e| ReindexError::serialization(e.to_string()))
    }
}
