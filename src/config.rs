//! Configuration management for ReSchedule

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub webhooks: WebhookConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub token: String,
    /// Shared secret embedded in the webhook routes
    pub access_key: String,
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub bot_username: Option<String>,
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    "reschedule.db".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_schedule_api_url")]
    pub api_url: String,
    /// IANA name of the civil timezone the timetable runs in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            api_url: default_schedule_api_url(),
            timezone: default_timezone(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ScheduleConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }
}

fn default_schedule_api_url() -> String {
    "https://schedule.kpi.ua/api/".to_string()
}

fn default_timezone() -> String {
    "Europe/Kyiv".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL Telegram should call, overrides the request's Host header
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from reschedule.toml
    pub fn load() -> Result<Self> {
        Self::load_from("reschedule.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;

            let mut config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;

            config.expand_env_vars();
            return Ok(config);
        }

        // Fall back to environment variables only
        Self::from_env()
    }

    /// Load configuration entirely from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            telegram: TelegramConfig {
                token: std::env::var("TELEGRAM_BOT_TOKEN")
                    .context("TELEGRAM_BOT_TOKEN environment variable required")?,
                access_key: std::env::var("ACCESS_KEY")
                    .context("ACCESS_KEY environment variable required")?,
                api_url: std::env::var("TELEGRAM_API_URL")
                    .unwrap_or_else(|_| default_telegram_api_url()),
                bot_username: std::env::var("TELEGRAM_BOT_USERNAME").ok(),
            },
            database: DatabaseConfig {
                path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| default_db_path()),
            },
            schedule: ScheduleConfig {
                api_url: std::env::var("SCHEDULE_API_URL")
                    .unwrap_or_else(|_| default_schedule_api_url()),
                timezone: std::env::var("SCHEDULE_TIMEZONE").unwrap_or_else(|_| default_timezone()),
                request_timeout_secs: std::env::var("SCHEDULE_REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_request_timeout),
            },
            webhooks: WebhookConfig {
                host: std::env::var("WEBHOOK_HOST").unwrap_or_else(|_| default_host()),
                port: std::env::var("WEBHOOK_PORT")
                    .unwrap_or_else(|_| default_port().to_string())
                    .parse()
                    .unwrap_or(default_port()),
                base_url: std::env::var("WEBHOOK_BASE_URL").ok(),
            },
        })
    }

    /// Expand ${VAR} patterns in secret fields
    fn expand_env_vars(&mut self) {
        self.telegram.token = expand_env(&self.telegram.token);
        self.telegram.access_key = expand_env(&self.telegram.access_key);
        if let Some(ref mut base_url) = self.webhooks.base_url {
            *base_url = expand_env(base_url);
        }
    }
}

/// Expand ${VAR} patterns in a string
fn expand_env(s: &str) -> String {
    let mut result = s.to_string();

    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let replacement = std::env::var(var_name).unwrap_or_default();
            result = format!("{}{}{}", &result[..start], replacement, &result[start + end + 1..]);
        } else {
            break;
        }
    }

    result
}
