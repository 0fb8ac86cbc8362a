//! Webhook ingress: registers the callback URL with Telegram and serves it with axum.
//!
//! Routes:
//! - `POST <webhook path>`: decode the update, push it onto the update queue; 200 on success, 500 otherwise.
//! - `GET /`, `GET /health`: 200 `OK` for uptime monitors.

use std::future::Future;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use teloxide::requests::Requester;
use teloxide::types::Update;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use unishark_core::{BotError, Result};

use crate::ingress::WebhookTarget;

#[derive(Clone)]
struct WebhookState {
    updates: mpsc::Sender<Update>,
}

/// Router for the webhook listener. Updates posted to `path` are sent to `updates`.
pub fn webhook_router(path: &str, updates: mpsc::Sender<Update>) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route(path, post(update_handler))
        .with_state(WebhookState { updates })
}

async fn health_handler() -> &'static str {
    "OK\n"
}

/// Failures are logged here; the caller only ever sees a bare status code.
async fn update_handler(State(state): State<WebhookState>, body: Bytes) -> StatusCode {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            let err = BotError::Decode(e.to_string());
            error!(error = %err, body_len = body.len(), "Failed to decode webhook update");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    let update_id = update.id.0;
    if let Err(e) = state.updates.send(update).await {
        error!(update_id, error = %e, "Update queue closed, dropping webhook update");
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    debug!(update_id, "Webhook update enqueued");
    StatusCode::OK
}

/// Registers the callback URL, then serves the webhook until `shutdown` resolves.
/// Registration failure is returned before the listener is bound.
#[instrument(skip_all, fields(addr = %target.listen_addr))]
pub async fn serve_webhook<S>(
    bot: &teloxide::Bot,
    target: &WebhookTarget,
    updates: mpsc::Sender<Update>,
    shutdown: S,
) -> Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    bot.set_webhook(target.callback_url.clone())
        .await
        .map_err(|e| BotError::Transport(format!("setWebhook failed: {}", e)))?;
    // The callback path embeds the bot token by default; log only the host.
    info!(
        host = target.callback_url.host_str().unwrap_or_default(),
        "Webhook registered"
    );

    let listener = TcpListener::bind(target.listen_addr).await?;
    info!(addr = %target.listen_addr, "Webhook listener started");

    axum::serve(listener, webhook_router(&target.path, updates))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Webhook listener stopped");
    Ok(())
}
