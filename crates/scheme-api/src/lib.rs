//! HTTP transport for the scheme assistant.
//!
//! Exposes the dialogue orchestrator as a small JSON API: one endpoint per
//! turn, session inspection and deletion, and a health check.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
