//! Configuration and dependency initialization for the reindex planner.

mod dependencies;

pub use dependencies::{Dependencies, PlannerSettings, DEFAULT_MAX_SLICES};
