//! Finnhub market news.

use super::{JsonArraySource, HttpSettings};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use edge_feed_core::{NewsProvider, NewsQuery, RawNewsItem, Result};
use serde::Deserialize;

/// Default Finnhub REST base URL.
pub const FINNHUB_API_URL: &str = "https://finnhub.io/api/v1";

/// Categories the `/news` endpoint accepts.
const CATEGORIES: &[&str] = &["general", "forex", "crypto", "merger"];

#[derive(Debug, Deserialize)]
struct FinnhubArticle {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    source: String,
    /// Unix seconds
    datetime: i64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    category: Option<String>,
    /// Comma-separated related tickers
    #[serde(default)]
    related: Option<String>,
}

impl FinnhubArticle {
    fn into_raw(self) -> Option<RawNewsItem> {
        if self.headline.trim().is_empty() {
            return None;
        }
        let timestamp = Utc.timestamp_opt(self.datetime, 0).single()?;
        let keywords = self
            .related
            .map(|r| {
                r.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut item = RawNewsItem::new(self.headline.trim(), self.source, timestamp)
            .with_summary(self.summary)
            .with_url(self.url)
            .with_keywords(keywords);
        item.id = self.id.map(|id| format!("finnhub-{id}"));
        item.category = self.category.filter(|c| !c.is_empty());
        Some(item)
    }
}

/// News from Finnhub's `/news` endpoint.
pub struct FinnhubNewsProvider {
    source: JsonArraySource,
    api_key: String,
}

impl FinnhubNewsProvider {
    /// # Errors
    /// Returns `FeedError::Configuration` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, settings: HttpSettings) -> Result<Self> {
        Ok(Self {
            source: JsonArraySource::new("finnhub", FINNHUB_API_URL, settings)?,
            api_key: api_key.into(),
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.source = self.source.with_base_url(url);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.source.base_url()
    }

    fn category_for(query: &NewsQuery) -> &'static str {
        let wanted = query.category.trim().to_lowercase();
        CATEGORIES
            .iter()
            .copied()
            .find(|c| *c == wanted)
            .unwrap_or("general")
    }
}

#[async_trait]
impl NewsProvider for FinnhubNewsProvider {
    async fn fetch_news(&self, query: &NewsQuery) -> Result<Vec<RawNewsItem>> {
        let params = [
            ("category", Self::category_for(query).to_string()),
            ("token", self.api_key.clone()),
        ];
        let articles: Vec<FinnhubArticle> = self.source.get_array("/news", &params).await?;

        let items: Vec<RawNewsItem> = articles
            .into_iter()
            .filter_map(FinnhubArticle::into_raw)
            .collect();
        tracing::debug!("Finnhub returned {} articles", items.len());
        Ok(items)
    }

    fn name(&self) -> &str {
        self.source.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_feed_core::FeedError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> FinnhubNewsProvider {
        FinnhubNewsProvider::new("demo", HttpSettings::default())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[test]
    fn test_provider_with_base_url() {
        let p = FinnhubNewsProvider::new("demo", HttpSettings::default()).unwrap();
        assert_eq!(p.base_url(), FINNHUB_API_URL);
        assert_eq!(p.name(), "finnhub");
    }

    #[tokio::test]
    async fn fetch_news_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("category", "general"))
            .and(query_param("token", "demo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 7001,
                    "headline": "Fed signals unexpected rate hike",
                    "summary": "Officials surprised markets.",
                    "source": "Bloomberg",
                    "datetime": 1732627800,
                    "url": "https://www.bloomberg.com/news/fed",
                    "category": "top news",
                    "related": "SPY, QQQ"
                },
                {
                    "id": 7002,
                    "headline": "   ",
                    "source": "Reuters",
                    "datetime": 1732627800
                }
            ])))
            .mount(&server)
            .await;

        let items = provider(&server).fetch_news(&NewsQuery::default()).await.unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id.as_deref(), Some("finnhub-7001"));
        assert_eq!(item.source, "Bloomberg");
        assert_eq!(item.keywords, vec!["SPY".to_string(), "QQQ".to_string()]);
        assert_eq!(item.timestamp.timestamp(), 1732627800);
    }

    #[tokio::test]
    async fn unknown_category_maps_to_general() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("category", "general"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let items = provider(&server)
            .fetch_news(&NewsQuery::new("equities"))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn error_object_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let err = provider(&server).fetch_news(&NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, FeedError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn http_error_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_news(&NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, FeedError::UpstreamUnavailable { .. }));
        assert!(err.is_skippable());
    }
}
