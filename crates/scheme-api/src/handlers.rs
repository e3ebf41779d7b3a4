//! Route handler functions for all API endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use scheme_chat::{ConversationContext, DialogueResponse};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Request body for POST /query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The user's message. A missing field is treated as empty.
    #[serde(default)]
    pub query: String,
    /// Existing session to continue; a new one is created when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Ask for the next page of the current results.
    #[serde(default)]
    pub show_more: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Summary of a session's state for GET /session/{id}.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub category: Option<String>,
    pub current_page: usize,
    pub total_schemes: usize,
    pub history_length: usize,
    pub last_discussed_scheme: Option<String>,
    pub eligibility_check_in_progress: bool,
    pub current_eligibility_question: usize,
    pub created_at: i64,
}

impl From<&ConversationContext> for SessionResponse {
    fn from(ctx: &ConversationContext) -> Self {
        Self {
            session_id: ctx.session_id.clone(),
            category: ctx.category.clone(),
            current_page: ctx.current_page,
            total_schemes: ctx.schemes.len(),
            history_length: ctx.conversation_history.len(),
            last_discussed_scheme: ctx.last_discussed_scheme.as_ref().map(|s| s.id.clone()),
            eligibility_check_in_progress: ctx.eligibility_check_in_progress,
            current_eligibility_question: ctx.current_eligibility_question,
            created_at: ctx.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
    pub backend: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /query - run one dialogue turn.
///
/// The turn runs on the blocking pool: it is synchronous end to end and may
/// wait on the search backend.
pub async fn query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<DialogueResponse>, ApiError> {
    let orchestrator = state.orchestrator.clone();
    let response = tokio::task::spawn_blocking(move || {
        orchestrator.handle_query(&req.query, req.session_id.as_deref(), req.show_more)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("query task failed: {}", e)))??;

    Ok(Json(response))
}

/// GET /session/{id} - inspect a session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let ctx = state.orchestrator.session(&id)?;
    Ok(Json(SessionResponse::from(&ctx)))
}

/// DELETE /session/{id} - forget a session. Deleting an unknown id succeeds.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.orchestrator.delete_session(&id)? {
        tracing::debug!(session_id = %id, "Delete requested for unknown session");
    }
    Ok(Json(MessageResponse {
        message: format!("Session {} deleted", id),
    }))
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "scheme-assistant".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.orchestrator.session_count(),
        backend: state.backend.to_string(),
    })
}
