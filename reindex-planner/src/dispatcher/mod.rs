//! Dispatcher module for the reindex planner.
//!
//! Emits each dispatchable sub-request as one line of JSON so that an
//! execution engine, or a queue in front of one, can pick them up.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use reindex_request::{ReindexError, ReindexRequest, SliceDispatcher};
use tracing::debug;

/// Dispatcher that writes every sub-request as a JSON line.
///
/// Lines are written whole under a lock, so concurrent dispatches never
/// interleave.
pub struct JsonLinesDispatcher<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesDispatcher<W> {
    /// Create a dispatcher writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the dispatcher and return the writer.
    pub fn into_inner(self) -> Result<W, ReindexError> {
        self.writer
            .into_inner()
            .map_err(|_| ReindexError::dispatch("writer lock poisoned"))
    }
}

#[async_trait]
impl<W: Write + Send> SliceDispatcher for JsonLinesDispatcher<W> {
    async fn dispatch(&self, request: &ReindexRequest) -> Result<(), ReindexError> {
        let mut line = request.to_json_bytes()?;
        line.push(b'\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ReindexError::dispatch("writer lock poisoned"))?;
        writer
            .write_all(&line)
            .and_then(|()| writer.flush())
            .map_err(|e| ReindexError::dispatch(e.to_string()))?;

        debug!(
            slice = ?request.source.slice.as_ref().map(|s| s.id()),
            bytes = line.len(),
            "Wrote sub-request"
        );
        Ok(())
    }
}
