// Integration tests for the HTTP host

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use safespace::catalog::PatternCatalog;
use safespace::config::ServerSettings;
use safespace::metrics::PipelineMetrics;
use safespace::pipeline::ResponseOrchestrator;
use safespace::providers::TextGenerator;
use safespace::server::{AppServer, ChatResponse, HealthStatus, SessionInfo};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct Offline;

#[async_trait::async_trait]
impl TextGenerator for Offline {
    async fn generate(&self, _prompt: &str) -> Option<String> {
        None
    }

    fn name(&self) -> &str {
        "offline"
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

fn app_with(settings: ServerSettings) -> Router {
    let metrics = Arc::new(PipelineMetrics::new().unwrap());
    let orchestrator = ResponseOrchestrator::new(PatternCatalog::default(), Arc::new(Offline))
        .unwrap()
        .with_metrics(Arc::clone(&metrics));

    AppServer::new(Arc::new(orchestrator), metrics, settings).into_router()
}

fn app() -> Router {
    app_with(ServerSettings::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_chat_returns_structured_result() {
    let app = app();

    let (status, body) = send(&app, chat_request(json!({ "message": "hello" }))).await;
    assert_eq!(status, StatusCode::OK);

    let reply: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(reply["tool"], "greeting");
    assert_eq!(reply["status"], "degraded");
    assert!(reply["response"].as_str().unwrap().contains("Welcome"));
    assert!(!reply["session_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_appends_both_turns_to_session() {
    let app = app();

    let (_, body) = send(&app, chat_request(json!({ "message": "hello" }))).await;
    let first: ChatResponse = serde_json::from_slice(&body).unwrap();

    let (_, body) = send(
        &app,
        chat_request(json!({ "message": "I feel so lonely", "session_id": first.session_id })),
    )
    .await;
    let second: ChatResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(second.session_id, first.session_id);
    assert_eq!(second.tool.as_str(), "loneliness_support");

    let (status, body) = send(&app, get(&format!("/v1/session/{}", first.session_id))).await;
    assert_eq!(status, StatusCode::OK);

    let info: SessionInfo = serde_json::from_slice(&body).unwrap();
    assert_eq!(info.message_count, 4);
    assert_eq!(info.messages[0].text, "hello");
    assert_eq!(info.messages[2].text, "I feel so lonely");
}

#[tokio::test]
async fn test_crisis_over_http() {
    let app = app();

    let (_, body) = send(&app, chat_request(json!({ "message": "I want to end my life" }))).await;
    let reply: ChatResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(reply.tool.as_str(), "crisis_intervention");
    assert!(reply.response.contains("988"));
}

#[tokio::test]
async fn test_delete_session() {
    let app = app();

    let (_, body) = send(&app, chat_request(json!({ "message": "hi" }))).await;
    let reply: ChatResponse = serde_json::from_slice(&body).unwrap();
    let uri = format!("/v1/session/{}", reply.session_id);

    let delete = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_session_limit_is_reported() {
    let app = app_with(ServerSettings {
        max_sessions: 1,
        ..ServerSettings::default()
    });

    let (status, _) = send(&app, chat_request(json!({ "message": "hi" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, chat_request(json!({ "message": "hi again" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_reports_rule_based_mode() {
    let app = app();
    send(&app, chat_request(json!({ "message": "hello" }))).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthStatus = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.mode, "rule_based");
    assert_eq!(health.active_sessions, 1);
}

#[tokio::test]
async fn test_resources_and_self_care() {
    let app = app();

    let (status, body) = send(&app, get("/v1/resources")).await;
    assert_eq!(status, StatusCode::OK);
    let resources: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(resources["region"], "us");
    assert_eq!(resources["sections"][0]["title"], "Crisis Support");

    let (status, body) = send(&app, get("/v1/self-care")).await;
    assert_eq!(status, StatusCode::OK);
    let tips: Value = serde_json::from_slice(&body).unwrap();
    assert!(!tips["sections"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_metrics_count_turns() {
    let app = app();
    send(&app, chat_request(json!({ "message": "hello" }))).await;

    let (status, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    let line = text
        .lines()
        .find(|line| line.starts_with("safespace_turns_total{"))
        .unwrap();
    assert!(line.contains("tool=\"greeting\""));
    assert!(line.contains("status=\"degraded\""));
    assert!(line.ends_with(" 1"));
}
