//! HTTP surface: Telegram posts updates to `POST /`, `GET /` answers liveness probes.
//!
//! Updates are acknowledged as soon as they parse; the handler chain runs in a tracked task so a
//! slow download never holds the HTTP request open (Telegram would retry it). On shutdown the server
//! stops accepting updates and then waits for those tasks.

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use teloxide::types::Update;
use tokio::net::TcpListener;
use tokio_util::task::TaskTracker;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::components::AppContext;
use crate::core::ToCoreEvent;
use crate::telegram::TelegramUpdateWrapper;

pub const LIVENESS_TEXT: &str = "Telegram Bot is running!";

/// Header Telegram uses to echo the secret given to setWebhook.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// State shared with the webhook handlers.
#[derive(Clone)]
pub struct WebhookState {
    app: AppContext,
    secret_token: Option<Arc<str>>,
    tasks: TaskTracker,
}

impl WebhookState {
    pub fn new(app: AppContext, secret_token: Option<String>) -> Self {
        Self {
            app,
            secret_token: secret_token.map(Arc::from),
            tasks: TaskTracker::new(),
        }
    }
}

/// Build the axum router for the webhook endpoint.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(liveness).post(receive_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Parses the update and hands it to the chain. Only a body that is not a Telegram update is an error;
/// processing failures are reported to the user, not to Telegram.
async fn receive_update(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    if let Some(expected) = state.secret_token.as_deref() {
        let given = headers.get(SECRET_TOKEN_HEADER).map(|v| v.as_bytes());
        if given != Some(expected.as_bytes()) {
            warn!("Rejected update with missing or wrong secret token");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "invalid secret token" })),
            );
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            error!(error = %e, body_len = body.len(), "Failed to parse update");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    match TelegramUpdateWrapper(&update).to_core() {
        Some(event) => {
            let app = state.app.clone();
            state.tasks.spawn(async move { app.dispatch(event).await });
        }
        None => debug!(update_id = ?update.id, "Ignoring unsupported update"),
    }

    (StatusCode::OK, Json(json!({ "ok": true })))
}

/// Binds `addr` and serves the webhook until Ctrl+C. In-flight requests then get up to `drain` to finish.
pub async fn serve(state: WebhookState, addr: SocketAddr, drain: Duration) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    serve_with_shutdown(state, listener, shutdown_signal(), drain).await
}

/// Serves on `listener` until `shutdown` resolves, then waits up to `drain` for dispatched updates.
pub async fn serve_with_shutdown<F>(
    state: WebhookState,
    listener: TcpListener,
    shutdown: F,
    drain: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(addr = %addr, "Webhook server listening");

    let tasks = state.tasks.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    tasks.close();
    if !tasks.is_empty() {
        info!(in_flight = tasks.len(), "Waiting for in-flight requests");
    }
    if tokio::time::timeout(drain, tasks.wait()).await.is_err() {
        warn!(in_flight = tasks.len(), "Stopping with requests still running");
    }

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// Tests live in tests/webhook_test.rs
