//! Upstream timetable API client
//!
//! Groups and schedules change rarely, so successful responses are cached.
//! The current time context is always fetched fresh.

use crate::config::ScheduleConfig;
use crate::error::ApiError;
use crate::schedule::{Group, Schedule, ScheduleTime};
use crate::services::cache::ResponseCache;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

pub const GROUPS_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const SCHEDULE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

const GROUPS_PATH: &str = "schedule/groups";
const LESSONS_PATH: &str = "schedule/lessons";
const CURRENT_TIME_PATH: &str = "time/current";

/// Cache key for a group's schedule. The request itself encodes the id.
fn schedule_key(group_id: &str) -> String {
    format!("{}?groupId={}", LESSONS_PATH, group_id)
}

/// Every endpoint wraps its payload in `{"data": ...}`
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Client for the schedule API, cheap to clone
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    base_url: String,
    client: reqwest::Client,
    groups: ResponseCache<Vec<Group>>,
    schedules: ResponseCache<Schedule>,
}

impl ScheduleClient {
    /// Create a new client for the configured API
    pub fn new(config: &ScheduleConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build schedule API HTTP client")?;

        let mut base_url = config.api_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            base_url,
            client,
            groups: ResponseCache::new(GROUPS_TTL),
            schedules: ResponseCache::new(SCHEDULE_TTL),
        })
    }

    /// All groups known to the API
    pub async fn get_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.groups
            .get_or_fetch(GROUPS_PATH, || self.fetch(GROUPS_PATH, &[]))
            .await
    }

    /// Both week tracks for a group
    pub async fn get_schedule(&self, group_id: &str) -> Result<Schedule, ApiError> {
        let key = schedule_key(group_id);
        let query = [("groupId", group_id)];
        self.schedules
            .get_or_fetch(&key, || self.fetch(LESSONS_PATH, &query))
            .await
    }

    /// Current week parity and day as seen by the server. Never cached.
    pub async fn get_current_time(&self) -> Result<ScheduleTime, ApiError> {
        self.fetch(CURRENT_TIME_PATH, &[]).await
    }

    /// GET `path` with `query` and decode the `data` field of a successful response
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Requesting {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} was not successful. Status code {}", path, status);
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            error!("Malformed response from {}: {}", path, e);
            ApiError::from(e)
        })?;

        Ok(envelope.data)
    }
}
