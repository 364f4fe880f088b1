//! Search source types for reindex requests.
//!
//! This module defines the search that selects which documents
//! are copied. The query itself is opaque JSON; it is carried, never parsed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::slice::SliceSpec;

/// Default number of documents fetched per scroll batch.
pub const DEFAULT_SCROLL_SIZE: u32 = 1000;

/// Default keep-alive of the scroll context between batches.
pub const DEFAULT_SCROLL_KEEP_ALIVE: Duration = Duration::from_secs(5 * 60);

/// The search that selects documents to copy.
///
/// Reindexing scrolls through every match, so paging (`from`) and stored
/// field retrieval are carried here only so they can be rejected during
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSource {
    /// Indices to read from.
    #[serde(default)]
    pub indices: Vec<String>,

    /// The query DSL body. `None` matches all documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,

    /// Explicit slice chosen by the caller, or set on sliced sub-requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice: Option<SliceSpec>,

    /// Documents fetched per scroll batch.
    #[serde(default = "default_scroll_size")]
    pub size: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored_fields: Option<Vec<String>>,

    /// `Some(false)` disables `_source`, which leaves nothing to copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_source: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Value>,

    #[serde(default = "default_scroll_keep_alive")]
    pub scroll_keep_alive: Duration,
}

fn default_scroll_size() -> u32 {
    DEFAULT_SCROLL_SIZE
}

fn default_scroll_keep_alive() -> Duration {
    DEFAULT_SCROLL_KEEP_ALIVE
}

impl Default for SearchSource {
    fn default() -> Self {
        Self {
            indices: Vec::new(),
            query: None,
            slice: None,
            size: DEFAULT_SCROLL_SIZE,
            from: None,
            stored_fields: None,
            fetch_source: None,
            sort: Vec::new(),
            scroll_keep_alive: DEFAULT_SCROLL_KEEP_ALIVE,
        }
    }
}

impl SearchSource {
    /// Create a match-all search over the given indices.
    ///
    /// # Example
    ///
    /// ```
    /// use reindex_shared::SearchSource;
    ///
    /// let source = SearchSource::new(["logs-2024", "logs-2025"]);
    /// assert_eq!(source.indices.len(), 2);
    /// assert!(!source.has_query());
    /// ```
    pub fn new<I, S>(indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            indices: indices.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the query body.
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Set an explicit slice.
    pub fn with_slice(mut self, slice: SliceSpec) -> Self {
        self.slice = Some(slice);
        self
    }

    /// Set the scroll batch size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Whether a non-empty query is set.
    ///
    /// JSON `null` and `{}` count as no query.
    pub fn has_query(&self) -> bool {
        match &self.query {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(_) => true,
        }
    }
}
