//! Error types for the reindex request crate.
//!
//! This module provides the unified error type returned by slicing, the
//! service and the dispatcher interface.

mod reindex_error;

pub use reindex_error::ReindexError;
