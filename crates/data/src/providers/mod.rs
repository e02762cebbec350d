//! Upstream news and calendar providers.
//!
//! Each HTTP provider wraps a [`JsonArraySource`]: a `reqwest` client with a
//! request timeout, a `governor` rate limiter and an overridable base URL.
//! Transport failures become `UpstreamUnavailable` or `Timeout`; a body that
//! is not a JSON array becomes `MalformedPayload`.

pub mod fair_economy;
pub mod finnhub;
pub mod fmp;
pub mod static_calendar;
pub mod static_news;

pub use fair_economy::FairEconomyCalendarProvider;
pub use finnhub::FinnhubNewsProvider;
pub use fmp::FmpCalendarProvider;
pub use static_calendar::StaticCalendar;
pub use static_news::StaticNews;

use edge_feed_core::{FeedError, ProvidersConfig, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// HTTP settings shared by every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub requests_per_minute: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(8000),
            requests_per_minute: 30,
        }
    }
}

impl From<&ProvidersConfig> for HttpSettings {
    fn from(config: &ProvidersConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.fetch_timeout_ms),
            requests_per_minute: config.requests_per_minute,
        }
    }
}

/// GET endpoint returning a JSON array.
#[derive(Debug, Clone)]
pub struct JsonArraySource {
    name: &'static str,
    http: Client,
    base_url: String,
    timeout: Duration,
    rate_limiter: Arc<DirectLimiter>,
}

impl JsonArraySource {
    /// # Errors
    /// Returns `FeedError::Configuration` if the HTTP client cannot be built.
    pub fn new(name: &'static str, base_url: &str, settings: HttpSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("edge-feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Configuration(format!("failed to build {name} client: {e}")))?;
        let per_minute =
            NonZeroU32::new(settings.requests_per_minute).unwrap_or(nonzero!(30u32));

        Ok(Self {
            name,
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fetches `path` and decodes every array element as `T`.
    ///
    /// Elements that fail to decode are skipped and logged; a body that is
    /// not an array at all is a `MalformedPayload`.
    pub async fn get_array<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {} ({})", url, self.name);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::upstream(self.name, format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| self.transport_error(&e))?;
        decode_array(self.name, &body)
    }

    fn transport_error(&self, err: &reqwest::Error) -> FeedError {
        if err.is_timeout() {
            FeedError::timeout(self.name, self.timeout.as_millis() as u64)
        } else {
            FeedError::upstream(self.name, err.to_string())
        }
    }
}

/// Decodes a JSON array body, skipping elements that don't fit `T`.
///
/// # Errors
/// Returns `FeedError::MalformedPayload` if `body` is not a JSON array.
pub fn decode_array<T: DeserializeOwned>(source_name: &str, body: &str) -> Result<Vec<T>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FeedError::malformed(source_name, format!("invalid JSON: {e}")))?;

    let serde_json::Value::Array(elements) = value else {
        let kind = match value {
            serde_json::Value::Object(_) => "object",
            serde_json::Value::Null => "null",
            serde_json::Value::String(_) => "string",
            _ => "scalar",
        };
        return Err(FeedError::malformed(
            source_name,
            format!("expected a JSON array, got {kind}"),
        ));
    };

    let total = elements.len();
    let decoded: Vec<T> = elements
        .into_iter()
        .filter_map(|e| serde_json::from_value(e).ok())
        .collect();
    if decoded.len() < total {
        tracing::warn!(
            source = source_name,
            skipped = total - decoded.len(),
            "Skipped malformed elements"
        );
    }
    Ok(decoded)
}

/// Renders a loosely-typed JSON field as trimmed text; empty or null is `None`.
pub(crate) fn json_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
