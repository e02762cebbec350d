//! In-memory [`CacheStore`].
//!
//! One `parking_lot::RwLock` over a key map. Writes replace the whole entry
//! under the write lock, so concurrent upserts are last-writer-wins per key
//! and readers never observe a partial entry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use edge_feed_core::{CacheEntry, CacheKey, CacheStore, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Process-local TTL cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Result<Option<CacheEntry>> {
        let entries = self.entries.read();
        Ok(entries.get(key).filter(|e| !e.is_expired(now)).cloned())
    }

    async fn get_stale(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(
        &self,
        key: CacheKey,
        payload: serde_json::Value,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<CacheEntry> {
        let entry = CacheEntry {
            key: key.clone(),
            payload,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.entries.write().insert(key, entry.clone());
        Ok(entry)
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.write().remove(key).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        Ok(before - entries.len())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }
}

/// Spawns a best-effort sweep of expired entries every `interval`.
///
/// TTL is enforced on read regardless; this only bounds memory.
pub fn spawn_cleanup(store: Arc<dyn CacheStore>, interval: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.delete_expired(Utc::now()).await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!("Cache sweep removed {} expired entries", removed),
                Err(e) => tracing::warn!(error = %e, "Cache sweep failed"),
            }
        }
    })
}
