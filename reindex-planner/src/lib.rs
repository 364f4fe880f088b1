//! # Reindex Planner
//!
//! Validates a reindex request and splits it into sliced sub-requests ready
//! for an execution engine.
//!
//! ## Architecture
//!
//! 1. **Planner**: Loads the serialized request and submits it
//! 2. **ReindexService**: Validates and slices the request
//! 3. **Dispatcher**: Emits every sub-request as a JSON line
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`dispatcher`]: JSON-lines dispatcher for sub-requests
//! - [`planner`]: Loads and submits the request
//! - [`errors`]: Error types for planning

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod planner;

pub use config::Dependencies;
pub use errors::PlanError;

use thiserror::Error;

/// Errors that can occur during planner initialization or execution.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Planning error.
    #[error("Plan error: {0}")]
    PlanError(#[from] PlanError),
}

impl PlannerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
