//! HTTP gateway: POST /chat → arbiter reply; GET /ai/status → backend status.
//!
//! Stateless: history comes in the request body. Backend problems are carried
//! in the reply text, so only malformed requests get a non-2xx status.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

use crate::arbiter::ArbiterSet;
use crate::backend::BackendSelector;
use crate::generator::ConversationTurn;
use crate::status::BackendStatus;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    #[serde(default)]
    pub backend: BackendSelector,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub backend: BackendSelector,
}

/// Query for GET /ai/status.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub backend: BackendSelector,
}

/// Shared state: arbiter pair + optional concurrency limit on chat turns.
#[derive(Clone)]
pub struct GatewayState {
    pub arbiters: Arc<ArbiterSet>,
    /// When Some, limits concurrent chat turns; excess requests wait for a slot.
    pub concurrency_semaphore: Option<Arc<Semaphore>>,
    pub max_concurrent: Option<usize>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_flight: Option<usize>,
}

#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

/// 400 when the message is blank. The message itself is forwarded untouched.
pub fn validate_chat_request(body: &ChatRequest) -> Result<(), (StatusCode, String)> {
    if body.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "message must be non-empty".to_string(),
        ));
    }
    Ok(())
}

async fn handle_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    validate_chat_request(&body)?;
    let _permit = if let Some(ref sem) = state.concurrency_semaphore {
        Some(sem.acquire().await.map_err(|_| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "concurrency limit closed".to_string(),
            )
        })?)
    } else {
        None
    };
    let response = state
        .arbiters
        .respond(&body.message, &body.history, body.backend)
        .await;
    Ok(Json(ChatResponse {
        response,
        backend: body.backend,
    }))
}

async fn handle_status(
    State(state): State<GatewayState>,
    Query(query): Query<StatusQuery>,
) -> Json<BackendStatus> {
    Json(state.arbiters.status(query.backend).await)
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    let in_flight = state.max_concurrent.and_then(|max| {
        state
            .concurrency_semaphore
            .as_ref()
            .map(|sem| max.saturating_sub(sem.available_permits()))
    });
    Json(GatewayHealthResponse {
        status: "healthy",
        max_concurrent: state.max_concurrent,
        in_flight,
    })
}

async fn handle_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Chat API is running",
    })
}

/// Build the gateway router.
pub fn router(arbiters: ArbiterSet, max_concurrent: Option<usize>) -> Router {
    let concurrency_semaphore = max_concurrent.map(|n| Arc::new(Semaphore::new(n)));
    let state = GatewayState {
        arbiters: Arc::new(arbiters),
        concurrency_semaphore,
        max_concurrent,
    };
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/chat", post(handle_chat))
        .route("/ai/status", get(handle_status))
        .with_state(state)
}

/// Run the HTTP server on `bind_addr` (e.g. `0.0.0.0:8000`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
pub async fn run_http(
    arbiters: ArbiterSet,
    bind_addr: &str,
    max_concurrent: Option<usize>,
) -> Result<()> {
    let app = router(arbiters, max_concurrent);
    let listener = TcpListener::bind(bind_addr).await?;
    let max_str = max_concurrent
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unlimited".to_string());
    tracing::info!(
        "gateway listening on {} (max_concurrent={}, Ctrl+C/SIGTERM to stop)",
        bind_addr,
        max_str
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(error) => {
                tracing::warn!(error = %error, "failed to listen for SIGTERM; Ctrl+C only");
                wait_ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            () = wait_ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    wait_ctrl_c().await;
}

async fn wait_ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
