use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use edge_feed_core::{NewsProvider, NewsQuery, RawNewsItem, Result};
use edge_feed_data::{FeedService, MemoryCache, StaticCalendar};
use edge_feed_signals::{FallbackClassifier, RuleClassifier};
use edge_feed_web_api::ApiServer;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StubNews;

#[async_trait]
impl NewsProvider for StubNews {
    async fn fetch_news(&self, _query: &NewsQuery) -> Result<Vec<RawNewsItem>> {
        Ok(vec![
            RawNewsItem::new("Nvidia shares surge after earnings", "Reuters", Utc::now())
                .with_url("https://reuters.com/nvda"),
            RawNewsItem::new("Celebrity wedding photos go viral", "Gossip", Utc::now()),
        ])
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn app() -> Router {
    let classifier = FallbackClassifier::new(RuleClassifier::new().unwrap());
    let service = FeedService::new(Arc::new(MemoryCache::new()), classifier)
        .unwrap()
        .with_news_provider(Arc::new(StubNews))
        .with_static_fallback(StaticCalendar::default());
    ApiServer::new(Arc::new(service)).router()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_session() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["marketSession"].is_string());
}

#[tokio::test]
async fn news_is_scored_and_flagged() {
    let (status, body) = send(app(), get("/api/news?portfolio=nvda,SPY")).await;
    assert_eq!(status, StatusCode::OK);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["portfolioMatches"], json!(["NVDA"]));
    assert!(items[0]["edgeScore"]["score"].as_u64().unwrap() <= 100);
    assert_eq!(body["meta"]["sourcesOk"], json!(["stub"]));
}

#[tokio::test]
async fn news_page_past_the_end_is_empty() {
    let (status, body) = send(app(), get("/api/news?page=2&limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn calendar_falls_back_to_static_set() {
    let (status, body) = send(app(), get("/api/calendar?usOnly=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["fallback"], true);
    assert!(body["groups"].is_array());
}

#[tokio::test]
async fn inverted_calendar_window_is_rejected() {
    let (status, _) = send(app(), get("/api/calendar?from=2024-11-27&to=2024-11-26")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn score_reference_scenario() {
    let request = json!({
        "text": "Fed signals unexpected rate hike",
        "source": "bloomberg.com",
        "sentiment": "bearish",
        "portfolio": [{"symbol": "SPY", "type": "etf"}]
    });
    let (status, body) = send(app(), post("/api/score", &request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 78);
    assert_eq!(body["level"], "high");
}

#[tokio::test]
async fn classify_rejects_blank_text() {
    let (status, _) = send(app(), post("/api/classify", &json!({"text": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app(),
        post("/api/classify", &json!({"text": "Fed signals unexpected rate hike"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isRelevant"], true);
    assert_eq!(body["topics"][0], "rates");
}
