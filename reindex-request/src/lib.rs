//! # Reindex Request
//!
//! This crate models a reindex operation: copying the documents matched by a
//! search into a destination index, optionally through a transform script,
//! optionally from a remote cluster, and optionally split into parallel
//! slices. It validates requests, derives sliced sub-requests, and defines the
//! interface through which those sub-requests reach an execution engine.
//!
//! Nothing here performs I/O or executes a search.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod request;
pub mod service;
pub mod slicing;
pub mod types;
pub mod validation;

pub use config::ReindexConfig;
pub use errors::ReindexError;
pub use interfaces::SliceDispatcher;
pub use request::ReindexRequest;
pub use service::ReindexService;
pub use slicing::{for_slice, for_slice_on_field, slice_into_sub_requests};
pub use types::{DispatchSummary, SliceDispatchResult};
pub use validation::{validate, FailureKind, ValidationErrors, ValidationFailure};
