//! Configuration types for slicing and the ReindexService.

use reindex_shared::DEFAULT_SLICE_FIELD;

/// Configuration for slice expansion.
///
/// Controls which field sliced sub-requests partition on and how many slices
/// a single request may be split into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexConfig {
    /// Field hashed to assign documents to slices.
    ///
    /// Must match the convention of the search engine that executes the
    /// sub-requests. Defaults to `_uid`.
    pub slice_field: String,

    /// Maximum number of slices one request may ask for.
    ///
    /// `None` (the default) leaves the ceiling to the execution engine.
    pub max_slices: Option<u32>,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            slice_field: DEFAULT_SLICE_FIELD.to_string(),
            max_slices: None,
        }
    }
}

impl ReindexConfig {
    /// Create a config with a slice ceiling.
    ///
    /// # Arguments
    ///
    /// * `max_slices` - Maximum number of slices a single request may ask for
    ///
    /// # Returns
    ///
    /// A `ReindexConfig` on the default slice field with the given ceiling.
    pub fn with_max_slices(max_slices: u32) -> Self {
        Self {
            max_slices: Some(max_slices),
            ..Self::default()
        }
    }

    /// Partition on `field` instead of the default slice field.
    pub fn slice_field(mut self, field: impl Into<String>) -> Self {
        self.slice_field = field.into();
        self
    }
}
