//! ReSchedule - Telegram bot for a rotating two-week timetable
//!
//! Answers:
//! - Full schedule, this week and next week
//! - Today and tomorrow
//! - Time left until the end of the current class or break

use anyhow::{Context, Result};
use reschedule::bot::Data;
use reschedule::services::ScheduleClient;
use reschedule::webhooks::{self, WebhookState};
use reschedule::{config, db};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    if std::path::Path::new(".env").exists() {
        dotenvy::dotenv()?;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("ReSchedule starting...");

    // Load configuration
    let config = config::Config::load()?;
    let tz = config.schedule.tz()?;
    info!("Configuration loaded");
    info!("Schedule API: {}", config.schedule.api_url);
    info!("Timezone: {}", tz);
    info!(
        "Public URL: {}",
        config.webhooks.base_url.as_deref().unwrap_or("from Host header")
    );

    // Initialize database
    let db = db::Database::new(&config.database.path)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.path))?;
    db.migrate().await.context("Failed to migrate database")?;
    info!("Database initialized ({} chats)", db.chat_count().await?);

    let api = ScheduleClient::new(&config.schedule)?;
    let data = Data::new(api, Arc::new(db), tz, config.telegram.bot_username.clone());

    // Serve webhooks until the server stops
    let state = WebhookState::new(&config, data)?;
    let server = webhooks::start_server(&config, state);
    info!("Webhook server starting on port {}", config.webhooks.port);

    tokio::select! {
        result = server => {
            result.context("Webhook server task failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C");
        }
    }

    info!("ReSchedule shutting down");
    Ok(())
}
