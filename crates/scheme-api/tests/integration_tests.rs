//! Integration tests for the scheme assistant HTTP API.
//!
//! Each test builds its own router over a fresh orchestrator backed by the
//! sample catalog.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use scheme_api::create_router;
use scheme_api::handlers::{HealthResponse, MessageResponse, SessionResponse};
use scheme_api::state::AppState;
use scheme_catalog::MockCatalog;
use scheme_chat::DialogueOrchestrator;
use scheme_core::AppConfig;

// =============================================================================
// Helpers
// =============================================================================

fn make_state() -> AppState {
    let config = AppConfig::default();
    let orchestrator = DialogueOrchestrator::new(&config, Arc::new(MockCatalog::new()));
    AppState::new(orchestrator, "mock")
}

fn make_app() -> axum::Router {
    create_router(make_state())
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(resp: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

/// Send one query on `app` and return the parsed body.
async fn send_query(app: &axum::Router, body: &str) -> Value {
    let resp = app.clone().oneshot(post_json("/query", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let resp = make_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "scheme-assistant");
    assert_eq!(health.backend, "mock");
    assert_eq!(health.active_sessions, 0);
}

// =============================================================================
// POST /query
// =============================================================================

#[tokio::test]
async fn test_query_new_session_search() {
    let app = make_app();
    let json = send_query(&app, r#"{"query": "I need crop insurance"}"#).await;

    assert!(!json["session_id"].as_str().unwrap().is_empty());
    assert_eq!(json["category"], "FARMER");
    assert_eq!(json["total_schemes"], 10);
    assert_eq!(json["shown_schemes"], 3);
    assert_eq!(json["has_more"], true);
    assert_eq!(json["schemes"].as_array().unwrap().len(), 3);
    assert_eq!(json["schemes"][0]["name"], "PM-KISAN Scheme");
    assert!(json["response"]
        .as_str()
        .unwrap()
        .starts_with("I found 10 farming schemes"));
}

#[tokio::test]
async fn test_query_unclear() {
    let json = send_query(&make_app(), r#"{"query": "hello"}"#).await;
    assert_eq!(json["category"], "UNCLEAR");
    assert!(json["schemes"].as_array().unwrap().is_empty());
    assert_eq!(json["total_schemes"], 0);
}

#[tokio::test]
async fn test_query_empty_is_bad_request() {
    let resp = make_app()
        .oneshot(post_json("/query", r#"{"query": "   "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["message"], "query cannot be empty");
}

#[tokio::test]
async fn test_query_missing_field_is_bad_request() {
    let resp = make_app()
        .oneshot(post_json("/query", r#"{"session_id": "abc"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_too_long() {
    let body = serde_json::json!({ "query": "a".repeat(2001) }).to_string();
    let resp = make_app().oneshot(post_json("/query", &body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conversation_across_requests() {
    let app = make_app();
    let first = send_query(&app, r#"{"query": "loan for my small business", "session_id": "s1"}"#).await;
    assert_eq!(first["session_id"], "s1");
    assert_eq!(first["category"], "MSME");

    let more = send_query(&app, r#"{"query": "next", "session_id": "s1", "show_more": true}"#).await;
    assert_eq!(more["shown_schemes"], 6);
    assert!(more["response"].as_str().unwrap().contains("**4. "));

    let detail = send_query(&app, r#"{"query": "how to apply for scheme 2", "session_id": "s1"}"#).await;
    assert_eq!(detail["schemes"].as_array().unwrap().len(), 1);
    assert_eq!(detail["schemes"][0]["name"], "MUDRA Loan Scheme");
    assert!(detail["response"]
        .as_str()
        .unwrap()
        .contains("https://www.mudra.org.in"));
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_get_session_snapshot() {
    let app = make_app();
    send_query(&app, r#"{"query": "tractor subsidy", "session_id": "farm-1"}"#).await;
    send_query(&app, r#"{"query": "am I eligible for scheme 1", "session_id": "farm-1"}"#).await;

    let resp = app.clone().oneshot(get("/session/farm-1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let session: SessionResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(session.category.as_deref(), Some("FARMER"));
    assert_eq!(session.total_schemes, 10);
    assert_eq!(session.history_length, 4);
    assert_eq!(session.last_discussed_scheme.as_deref(), Some("farmer-1"));
    assert!(session.eligibility_check_in_progress);
    assert_eq!(session.current_eligibility_question, 0);
}

#[tokio::test]
async fn test_get_unknown_session_404() {
    let resp = make_app().oneshot(get("/session/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["message"], "session not found: nope");
}

#[tokio::test]
async fn test_delete_session() {
    let app = make_app();
    send_query(&app, r#"{"query": "crop", "session_id": "gone"}"#).await;

    let resp = app.clone().oneshot(delete("/session/gone")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let msg: MessageResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(msg.message, "Session gone deleted");

    let resp = app.clone().oneshot(get("/session/gone")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Idempotent.
    let resp = app.clone().oneshot(delete("/session/gone")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_counts_sessions() {
    let app = make_app();
    send_query(&app, r#"{"query": "crop", "session_id": "a"}"#).await;
    send_query(&app, r#"{"query": "crop", "session_id": "b"}"#).await;

    let resp = app.clone().oneshot(get("/health")).await.unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["active_sessions"], 2);
}

#[tokio::test]
async fn test_unknown_route_404() {
    let resp = make_app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
