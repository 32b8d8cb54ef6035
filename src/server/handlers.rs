// HTTP request handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::session::SessionError;
use super::AppServer;
use crate::conversation::Message;
use crate::crisis::HotlineRegion;
use crate::pipeline::{ResponseStatus, ResponseTool};
use crate::resources::{self, ResourceSection};

/// Create the application router
pub fn create_router(server: Arc<AppServer>) -> Router {
    Router::new()
        .route("/v1/chat", post(handle_chat))
        .route("/v1/session/:id", get(get_session).delete(delete_session))
        .route("/v1/resources", get(get_resources))
        .route("/v1/self-care", get(get_self_care))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(server)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Omit to start a new session
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub tool: ResponseTool,
    pub status: ResponseStatus,
    pub session_id: String,
}

/// Handle POST /v1/chat - one turn through the pipeline
async fn handle_chat(
    State(server): State<Arc<AppServer>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let (session_id, history) = server
        .session_manager()
        .get_or_create(request.session_id.as_deref())?;

    let result = server
        .orchestrator()
        .process(&request.message, &history)
        .await;
    let user = Message::user(request.message.as_str())
        .with_emotions(server.orchestrator().detect_emotions(&request.message));

    tracing::info!(
        session_id = %session_id,
        tool = %result.tool,
        status = result.status.as_str(),
        "Chat turn completed"
    );

    // The session may have been deleted while the turn was in flight
    if let Err(e) = server
        .session_manager()
        .record_turn(&session_id, user, &result)
    {
        tracing::warn!(session_id = %session_id, "Turn not recorded: {}", e);
    }

    Ok(Json(ChatResponse {
        response: result.response,
        tool: result.tool,
        status: result.status,
        session_id,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub created_at: String,
    pub last_activity: String,
    pub message_count: usize,
    pub messages: Vec<Message>,
}

/// Handle GET /v1/session/:id - conversation so far
async fn get_session(
    State(server): State<Arc<AppServer>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionInfo>, AppError> {
    let session = server
        .session_manager()
        .get(&session_id)
        .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;

    Ok(Json(SessionInfo {
        id: session.id,
        created_at: session.created_at.to_rfc3339(),
        last_activity: session.last_activity.to_rfc3339(),
        message_count: session.conversation.message_count(),
        messages: session.conversation.messages().to_vec(),
    }))
}

/// Handle DELETE /v1/session/:id - drop the session and its history
async fn delete_session(
    State(server): State<Arc<AppServer>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if server.session_manager().delete(&session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(SessionError::NotFound(session_id).into())
    }
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub region: HotlineRegion,
    pub sections: Vec<ResourceSection>,
}

async fn get_resources(State(server): State<Arc<AppServer>>) -> Json<ResourcesResponse> {
    let region = server.orchestrator().region();
    Json(ResourcesResponse {
        region,
        sections: resources::support_resources(region),
    })
}

#[derive(Debug, Serialize)]
pub struct SelfCareResponse {
    pub sections: Vec<ResourceSection>,
}

async fn get_self_care() -> Json<SelfCareResponse> {
    Json(SelfCareResponse {
        sections: resources::self_care_tips(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// "ai" when a generation credential is configured, else "rule_based"
    pub mode: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

/// Handle GET /health - Health check endpoint
pub async fn health_check(State(server): State<Arc<AppServer>>) -> Json<HealthStatus> {
    let mode = if server.orchestrator().is_ai_enabled() {
        "ai"
    } else {
        "rule_based"
    };

    Json(HealthStatus {
        status: "healthy".to_string(),
        mode: mode.to_string(),
        uptime_seconds: server.uptime().as_secs(),
        active_sessions: server.session_manager().active_count(),
    })
}

/// Handle GET /metrics - Prometheus metrics endpoint
pub async fn metrics_endpoint(State(server): State<Arc<AppServer>>) -> Result<Response, AppError> {
    let body = server.metrics().render()?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

/// Application error wrapper for proper HTTP error responses
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn new(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
        } else {
            tracing::debug!(error = %self.error, "Request rejected");
        }

        let error_type = match self.status {
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::SERVICE_UNAVAILABLE => "overloaded",
            _ => "api_error",
        };

        let body = serde_json::json!({
            "error": {
                "message": self.error.to_string(),
                "type": error_type
            }
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let status = match err {
            SessionError::LimitReached { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        Self::new(status, err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}
