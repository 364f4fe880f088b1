//! This module defines the value types shared by reindex requests.
//! Each type lives in its own submodule and is re-exported from the crate root.

pub mod destination;
pub mod remote_info;
pub mod script;
pub mod search_source;
pub mod slice;
pub mod task_id;
