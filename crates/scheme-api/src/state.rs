//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use scheme_chat::DialogueOrchestrator;

/// Shared application state.
///
/// Cheap to clone; handlers receive it through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The dialogue engine, shared by every request.
    pub orchestrator: Arc<DialogueOrchestrator>,
    /// Name of the search backend in use ("mock" or "vertex").
    pub backend: &'static str,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(orchestrator: DialogueOrchestrator, backend: &'static str) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            backend,
            start_time: Instant::now(),
        }
    }
}
