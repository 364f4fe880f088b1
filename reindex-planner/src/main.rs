//! Reindex Planner Main Entry Point
//!
//! Reads a reindex request, validates it, and writes its dispatchable
//! sub-requests to standard output as JSON lines. Logs go to standard error.

use dotenv::dotenv;
use reindex_planner::{Dependencies, PlannerError};
use std::env;
use std::io;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), PlannerError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reindex_planner=info,reindex_request=info"));

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| PlannerError::config(format!("Failed to initialize tracing: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .pretty(),
            )
            .try_init()
            .map_err(|e| PlannerError::config(format!("Failed to initialize tracing: {}", e)))?;
    }

    info!(
        service_name = "reindex-planner",
        service_version = env!("CARGO_PKG_VERSION"),
        json_output,
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), PlannerError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting reindex planner");

    let deps = match Dependencies::new() {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.planner.run().await {
        Ok(summary) => {
            info!(
                sub_requests = summary.total,
                "Reindex request planned successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Reindex planning failed");
            Err(e.into())
        }
    }
}
