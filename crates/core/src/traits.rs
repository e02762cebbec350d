use crate::cache::{CacheEntry, CacheKey};
use crate::calendar::RawCalendarRecord;
use crate::classification::Classification;
use crate::error::Result;
use crate::news::RawNewsItem;
use crate::query::{CalendarQuery, NewsQuery};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// Maps text to market topics.
///
/// Rule-based and LLM classifiers share this contract so either can serve any item.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification>;
    fn name(&self) -> &str;
}

/// Upstream news feed.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch_news(&self, query: &NewsQuery) -> Result<Vec<RawNewsItem>>;
    fn name(&self) -> &str;
}

/// Upstream economic-calendar feed.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn fetch_calendar(&self, query: &CalendarQuery) -> Result<Vec<RawCalendarRecord>>;
    fn name(&self) -> &str;
}

/// Key-value cache with TTL.
///
/// `get` treats expired entries as misses. `get_stale` ignores expiry and is
/// only for callers that decide to serve stale data after an upstream failure.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Result<Option<CacheEntry>>;
    async fn get_stale(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;
    /// Upserts the entry for `key`.
    async fn set(
        &self,
        key: CacheKey,
        payload: serde_json::Value,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<CacheEntry>;
    async fn delete(&self, key: &CacheKey) -> Result<bool>;
    /// Removes expired entries, returning how many were dropped.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize>;
    async fn clear(&self) -> Result<()>;
}
