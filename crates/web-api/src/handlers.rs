use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use edge_feed_core::{
    CalendarQuery, Classification, EdgeScore, FeedError, NewsQuery, PortfolioAsset, Sentiment,
};
use edge_feed_data::{CalendarFeed, FeedService, NewsFeed};
use edge_feed_signals::{resolve_sentiment, ScoreInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Widest calendar window a single request may ask for.
const MAX_CALENDAR_DAYS: i64 = 31;
/// Days shown when the caller gives no `to` date.
const DEFAULT_CALENDAR_DAYS: i64 = 6;
const MAX_NEWS_LIMIT: usize = 200;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsParams {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<usize>,
    /// Comma-separated portfolio symbols
    pub portfolio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub us_only: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub text: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    pub sentiment: Option<Sentiment>,
    pub source_quality: Option<u8>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioAsset>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<Utc>,
    pub market_session: edge_feed_core::SessionBucket,
    pub exchange_time: String,
}

fn internal_error(e: &FeedError) -> StatusCode {
    tracing::warn!(error = %e, "Request failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Scored news for a category, flagged against an optional portfolio.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the pipeline fails.
pub async fn get_news(
    State(service): State<Arc<FeedService>>,
    Query(params): Query<NewsParams>,
) -> Result<Json<NewsFeed>, StatusCode> {
    let mut query = NewsQuery::new(params.category.unwrap_or_else(|| "general".to_string()));
    if let Some(page) = params.page {
        query = query.with_page(page.max(1));
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit.clamp(1, MAX_NEWS_LIMIT));
    }
    let portfolio = params
        .portfolio
        .as_deref()
        .map(PortfolioAsset::parse_list)
        .unwrap_or_default();

    let feed = service
        .news(&query, &portfolio, Utc::now())
        .await
        .map_err(|e| internal_error(&e))?;
    Ok(Json(feed))
}

/// Upcoming calendar events grouped by day.
///
/// Defaults to the coming week in exchange time.
///
/// # Errors
/// Returns `StatusCode::BAD_REQUEST` for an inverted or oversized window, or
/// `StatusCode::INTERNAL_SERVER_ERROR` if the pipeline fails.
pub async fn get_calendar(
    State(service): State<Arc<FeedService>>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<CalendarFeed>, StatusCode> {
    let now = Utc::now();
    let from = params.from.unwrap_or_else(|| service.clock().today(now));
    let to = params
        .to
        .unwrap_or_else(|| from + Duration::days(DEFAULT_CALENDAR_DAYS));
    if to < from || (to - from).num_days() >= MAX_CALENDAR_DAYS {
        return Err(StatusCode::BAD_REQUEST);
    }

    let query = CalendarQuery::new(from, to).us_only(params.us_only);
    let feed = service
        .calendar(&query, now)
        .await
        .map_err(|e| internal_error(&e))?;
    Ok(Json(feed))
}

/// EdgeScore for an ad-hoc item.
///
/// # Errors
/// Returns `StatusCode::BAD_REQUEST` if `text` is blank.
pub async fn post_score(
    State(service): State<Arc<FeedService>>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<EdgeScore>, StatusCode> {
    if req.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let sentiment = resolve_sentiment(req.sentiment, &req.text);
    let mut input = ScoreInput::new(req.text, req.source)
        .with_url(req.url)
        .with_sentiment(sentiment);
    if let Some(quality) = req.source_quality {
        input = input.with_source_quality(quality);
    }
    Ok(Json(service.score_item(&input, &req.portfolio)))
}

/// Topic classification through the fallback chain.
///
/// # Errors
/// Returns `StatusCode::BAD_REQUEST` if `text` is blank.
pub async fn post_classify(
    State(service): State<Arc<FeedService>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<Classification>, StatusCode> {
    if req.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(service.classify_text(&req.text).await))
}

pub async fn health(State(service): State<Arc<FeedService>>) -> Json<HealthResponse> {
    let now = Utc::now();
    let clock = service.clock();
    Json(HealthResponse {
        status: "ok",
        timestamp: now,
        market_session: clock.session(now),
        exchange_time: clock.time_label(now),
    })
}
