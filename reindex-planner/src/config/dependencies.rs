//! Dependency initialization and wiring for the reindex planner.

use std::env;
use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::dispatcher::JsonLinesDispatcher;
use crate::planner::Planner;
use crate::PlannerError;
use reindex_request::{ReindexConfig, ReindexService};
use reindex_shared::{TaskId, DEFAULT_SLICE_FIELD};

/// Default node id recorded on the slicing task.
const DEFAULT_NODE_ID: &str = "planner";

/// Default numeric id of the slicing task.
const DEFAULT_TASK_ID: u64 = 1;

/// Default ceiling on the number of slices one request may ask for.
pub const DEFAULT_MAX_SLICES: u32 = 1024;

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSettings {
    /// Path of the JSON reindex request to plan.
    pub request_path: PathBuf,
    /// Task recorded as the parent of every sliced sub-request.
    pub slicing_task: TaskId,
    /// Ceiling on the number of slices.
    pub max_slices: u32,
    /// Field hashed to assign documents to slices.
    pub slice_field: String,
}

impl PlannerSettings {
    /// Read settings through `lookup`, which returns the value of a variable if set.
    ///
    /// # Environment Variables
    ///
    /// - `REINDEX_REQUEST_PATH`: Path of the JSON request (required)
    /// - `REINDEX_NODE_ID`: Node id of the slicing task (default: planner)
    /// - `REINDEX_TASK_ID`: Numeric id of the slicing task (default: 1)
    /// - `REINDEX_MAX_SLICES`: Maximum number of slices (default: 1024)
    /// - `REINDEX_SLICE_FIELD`: Field to slice on (default: _uid)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_path = lookup("REINDEX_REQUEST_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| PlannerError::config("REINDEX_REQUEST_PATH must be set"))?;

        let node_id = lookup("REINDEX_NODE_ID").unwrap_or_else(|| DEFAULT_NODE_ID.to_string());
        let task_id = match lookup("REINDEX_TASK_ID") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                PlannerError::config(format!("Invalid REINDEX_TASK_ID [{}]: {}", raw, e))
            })?,
            None => DEFAULT_TASK_ID,
        };

        let max_slices = match lookup("REINDEX_MAX_SLICES") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(max) if max > 0 => max,
                _ => {
                    warn!(
                        value = %raw,
                        default = DEFAULT_MAX_SLICES,
                        "Invalid REINDEX_MAX_SLICES, using default"
                    );
                    DEFAULT_MAX_SLICES
                }
            },
            None => DEFAULT_MAX_SLICES,
        };

        let slice_field =
            lookup("REINDEX_SLICE_FIELD").unwrap_or_else(|| DEFAULT_SLICE_FIELD.to_string());

        Ok(Self {
            request_path,
            slicing_task: TaskId::new(node_id, task_id),
            max_slices,
            slice_field,
        })
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Slicing configuration for the `ReindexService`.
    pub fn reindex_config(&self) -> ReindexConfig {
        ReindexConfig {
            slice_field: self.slice_field.clone(),
            max_slices: Some(self.max_slices),
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured planner ready to run.
    pub planner: Planner,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Sub-requests are written as JSON lines to standard output.
    pub fn new() -> Result<Self, PlannerError> {
        let settings = PlannerSettings::from_env()?;

        info!(
            request_path = %settings.request_path.display(),
            slicing_task = %settings.slicing_task,
            max_slices = settings.max_slices,
            slice_field = %settings.slice_field,
            "Initializing dependencies"
        );

        let dispatcher = JsonLinesDispatcher::new(io::stdout());
        let service = ReindexService::with_config(Box::new(dispatcher), settings.reindex_config());
        let planner = Planner::new(service, settings.slicing_task, settings.request_path);

        Ok(Self { planner })
    }
}
