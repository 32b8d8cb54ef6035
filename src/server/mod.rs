// SafeSpace HTTP host
// JSON chat endpoint with in-memory per-session conversations

mod handlers;
mod session;

pub use handlers::{
    create_router, health_check, metrics_endpoint, AppError, ChatRequest, ChatResponse,
    HealthStatus, SessionInfo,
};
pub use session::{SessionError, SessionManager, SessionState};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerSettings;
use crate::metrics::PipelineMetrics;
use crate::pipeline::ResponseOrchestrator;

/// Shared state behind every route
pub struct AppServer {
    orchestrator: Arc<ResponseOrchestrator>,
    metrics: Arc<PipelineMetrics>,
    session_manager: SessionManager,
    config: ServerSettings,
    started_at: Instant,
}

impl AppServer {
    /// The orchestrator should already report into `metrics`
    pub fn new(
        orchestrator: Arc<ResponseOrchestrator>,
        metrics: Arc<PipelineMetrics>,
        config: ServerSettings,
    ) -> Self {
        let session_manager =
            SessionManager::new(config.max_sessions, config.session_timeout_minutes);

        Self {
            orchestrator,
            metrics,
            session_manager,
            config,
            started_at: Instant::now(),
        }
    }

    /// Router with tracing and CORS layers applied
    pub fn into_router(self) -> axum::Router {
        create_router(Arc::new(self))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Bind and serve until the process is stopped
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let mode = if self.orchestrator.is_ai_enabled() {
            "ai"
        } else {
            "rule_based"
        };
        let app = self.into_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!(%addr, mode, "Starting SafeSpace server");
        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }

    pub fn orchestrator(&self) -> &Arc<ResponseOrchestrator> {
        &self.orchestrator
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.metrics
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    pub fn config(&self) -> &ServerSettings {
        &self.config
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
