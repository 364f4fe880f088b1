//! Interface definitions for the execution engine.
//!
//! This module defines the abstract `SliceDispatcher` trait that the engine
//! running reindex sub-requests implements, so the service can be tested
//! with mock dispatchers.

mod slice_dispatcher;

pub use slice_dispatcher::SliceDispatcher;
