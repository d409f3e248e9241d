//! TTL cache for upstream responses
//!
//! Backed by [`moka`]: entries expire after the cache's time-to-live and the
//! total size is bounded. Two concurrent misses on the same key both fetch;
//! the last write wins.

use moka::future::Cache;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Default bound on stored responses per cache
pub const MAX_CACHE_ENTRIES: u64 = 1_000;

/// Shared response cache, cheap to clone
#[derive(Debug, Clone)]
pub struct ResponseCache<V: Clone + Send + Sync + 'static> {
    entries: Cache<String, V>,
    ttl: Duration,
}

impl<V: Clone + Send + Sync + 'static> ResponseCache<V> {
    /// Cache holding at most [`MAX_CACHE_ENTRIES`] responses for `ttl` each
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, MAX_CACHE_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live entry for `key`, or run `fetch` and store its success.
    ///
    /// Failures from `fetch` are returned as-is and never cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(payload) = self.get(key).await {
            debug!("Cache hit for {}", key);
            return Ok(payload);
        }

        let payload = fetch().await?;
        self.insert(key, payload.clone()).await;
        Ok(payload)
    }

    /// Live entry for `key`, if any
    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).await
    }

    pub async fn insert(&self, key: &str, payload: V) {
        self.entries.insert(key.to_string(), payload).await;
        debug!("Cached {} for {:?}", key, self.ttl);
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Number of stored entries after pending evictions are applied
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
