//! HTTP server receiving Telegram updates

use crate::bot::{self, Data};
use crate::config::Config;
use crate::services::TelegramClient;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use teloxide::types::{Update, UpdateKind};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared state for webhook handlers
#[derive(Clone)]
pub struct WebhookState {
    pub data: Data,
    pub telegram: TelegramClient,
    pub access_key: String,
    /// Public URL override for webhook registration
    pub base_url: Option<String>,
}

impl WebhookState {
    pub fn new(config: &Config, data: Data) -> anyhow::Result<Self> {
        Ok(Self {
            data,
            telegram: TelegramClient::new(&config.telegram)?,
            access_key: config.telegram.access_key.clone(),
            base_url: config.webhooks.base_url.clone(),
        })
    }
}

/// Routes for health checks, webhook setup and update delivery
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/setup/:key", get(setup).post(setup))
        .route("/handleupdate/:key", post(handle_update))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the webhook server in the background
pub fn start_server(config: &Config, state: WebhookState) -> JoinHandle<()> {
    let addr = format!("{}:{}", config.webhooks.host, config.webhooks.port);

    tokio::spawn(async move {
        let app = router(state);

        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to bind webhook server to {}: {}", addr, e);
                return;
            }
        };

        info!("Webhook server listening on {}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("Webhook server error: {}", e);
        }
    })
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Register `/handleupdate/{key}` as the bot's webhook
async fn setup(
    State(state): State<Arc<WebhookState>>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, &'static str) {
    if key != state.access_key {
        warn!("Setup called with a wrong access key");
        return (StatusCode::FORBIDDEN, "Your key was not accepted");
    }

    let base_url = match &state.base_url {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
            Some(host) => format!("https://{}", host),
            None => {
                warn!("Setup called without a Host header and no base_url configured");
                return (StatusCode::BAD_REQUEST, "Cannot determine the public URL");
            }
        },
    };
    let webhook_url = format!("{}/handleupdate/{}", base_url, key);

    match state.telegram.set_webhook(&webhook_url).await {
        Ok(()) => {
            info!("Webhook registered at {}/handleupdate/***", base_url);
            (StatusCode::OK, "Your key was accepted")
        }
        Err(e) => {
            error!("Failed to register webhook: {:#}", e);
            (StatusCode::BAD_GATEWAY, "Failed to register the webhook")
        }
    }
}

/// Keep-alive pings carry only a `type` field
#[derive(Deserialize)]
struct HealthCheck {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Handle a Telegram update. Anything that isn't a text command is dropped.
async fn handle_update(
    State(state): State<Arc<WebhookState>>,
    Path(key): Path<String>,
    body: String,
) -> StatusCode {
    if key != state.access_key {
        warn!("Ignoring update with a wrong access key");
        return StatusCode::OK;
    }

    if let Ok(HealthCheck { kind: Some(kind) }) = serde_json::from_str::<HealthCheck>(&body) {
        info!("Received health check ({})", kind);
        return StatusCode::OK;
    }

    let update: Update = match serde_json::from_str(&body) {
        Ok(u) => u,
        Err(e) => {
            warn!("Can't deserialize update: {}", e);
            return StatusCode::OK;
        }
    };

    let message = match update.kind {
        UpdateKind::Message(m) => m,
        _ => {
            debug!("Ignoring non-message update {:?}", update.id);
            return StatusCode::OK;
        }
    };

    let chat_id = message.chat.id.0;
    let text = match message.text().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => {
            debug!("Ignoring non-text message in chat {}", chat_id);
            return StatusCode::OK;
        }
    };
    let sent_at = message.date;

    if let Some(reply) = bot::handle_command(&state.data, chat_id, sent_at, text).await {
        if let Err(e) = state.telegram.send_message(chat_id, &reply).await {
            error!("Failed to reply to chat {}: {:#}", chat_id, e);
        }
    }

    StatusCode::OK
}
