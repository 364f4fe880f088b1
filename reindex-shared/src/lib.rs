//! # Reindex Shared
//!
//! This crate defines the value types a reindex request is assembled from.
//! They describe the search that selects documents, how that search is
//! partitioned into slices, where documents are written, and where they are
//! read from when the source is a remote cluster.

pub mod types;

pub use types::destination::{Destination, OpType, VersionType};
pub use types::remote_info::{
    RemoteAuth, RemoteInfo, RemoteInfoError, DEFAULT_CONNECT_TIMEOUT, DEFAULT_SOCKET_TIMEOUT,
};
pub use types::script::{Script, DEFAULT_SCRIPT_LANG};
pub use types::search_source::{SearchSource, DEFAULT_SCROLL_KEEP_ALIVE, DEFAULT_SCROLL_SIZE};
pub use types::slice::{SliceError, SliceSpec, DEFAULT_SLICE_FIELD};
pub use types::task_id::{TaskId, TaskIdError};
