//! The feed pipeline.
//!
//! `FeedService` fetches from every provider concurrently, normalizes,
//! classifies, dedups and caches. Scoring, portfolio flags, filters and
//! ordering are applied per request because they depend on the caller's
//! portfolio and on `now`.

use crate::aggregate::{
    calendar_key, dedup_by_key, filter_events, group_by_date, merge_sources, news_key,
    sort_events, sort_news, DayGroup, Merged, SourceOutcome,
};
use crate::cache::MemoryCache;
use crate::normalize::{normalize_calendar, normalize_news, relabel};
use crate::providers::{
    FairEconomyCalendarProvider, FinnhubNewsProvider, FmpCalendarProvider, HttpSettings,
    StaticCalendar, StaticNews,
};
use chrono::{DateTime, Utc};
use edge_feed_core::{
    AppConfig, CacheKey, CacheStore, CalendarEvent, CalendarProvider, CalendarQuery,
    Classification, EdgeScore, FeedError, NewsItem, NewsProvider, NewsQuery, PortfolioAsset,
    RawCalendarRecord, RawNewsItem, Result,
};
use edge_feed_signals::{FallbackClassifier, ImpactScorer, MarketClock, PortfolioMatcher, ScoreInput};
use futures_util::future::join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// How a response was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedMeta {
    /// Served from an expired cache entry after every provider failed
    pub stale: bool,
    /// Served from the built-in static set
    pub fallback: bool,
    pub sources_ok: Vec<String>,
    pub sources_failed: Vec<String>,
}

impl FeedMeta {
    fn from_merge<T>(merged: &Merged<T>) -> Self {
        Self {
            stale: false,
            fallback: false,
            sources_ok: merged.sources_ok.clone(),
            sources_failed: merged.sources_failed.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    pub items: Vec<NewsItem>,
    pub meta: FeedMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFeed {
    pub events: Vec<CalendarEvent>,
    pub groups: Vec<DayGroup>,
    pub meta: FeedMeta,
}

/// Longest cache TTL accepted from configuration: one year.
const MAX_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Timing knobs for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub news_ttl: chrono::Duration,
    pub calendar_ttl: chrono::Duration,
    /// Bound on each provider call
    pub fetch_timeout: Duration,
    pub same_day_cutoff_hour: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            news_ttl: chrono::Duration::seconds(300),
            calendar_ttl: chrono::Duration::seconds(900),
            fetch_timeout: Duration::from_millis(8000),
            same_day_cutoff_hour: 12,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            news_ttl: ttl_from_secs(config.cache.news_ttl_secs),
            calendar_ttl: ttl_from_secs(config.cache.calendar_ttl_secs),
            fetch_timeout: Duration::from_millis(config.providers.fetch_timeout_ms),
            same_day_cutoff_hour: config.session.same_day_cutoff_hour,
        }
    }
}

fn ttl_from_secs(secs: u64) -> chrono::Duration {
    let clamped = i64::try_from(secs).map_or(MAX_TTL_SECS, |s| s.min(MAX_TTL_SECS));
    if clamped.unsigned_abs() < secs {
        tracing::warn!("Cache TTL of {}s clamped to {}s", secs, MAX_TTL_SECS);
    }
    chrono::Duration::seconds(clamped)
}

/// Wires providers, cache, classifier and scorer into the news and calendar feeds.
pub struct FeedService {
    news_providers: Vec<Arc<dyn NewsProvider>>,
    calendar_providers: Vec<Arc<dyn CalendarProvider>>,
    cache: Arc<dyn CacheStore>,
    classifier: FallbackClassifier,
    scorer: ImpactScorer,
    matcher: PortfolioMatcher,
    clock: MarketClock,
    static_calendar: Option<StaticCalendar>,
    static_news: Option<StaticNews>,
    settings: ServiceSettings,
}

impl FeedService {
    /// A service with no providers and default settings.
    ///
    /// # Errors
    /// Returns `FeedError::Configuration` if the portfolio matcher cannot be built.
    pub fn new(cache: Arc<dyn CacheStore>, classifier: FallbackClassifier) -> Result<Self> {
        Ok(Self {
            news_providers: Vec::new(),
            calendar_providers: Vec::new(),
            cache,
            classifier,
            scorer: ImpactScorer::new(),
            matcher: PortfolioMatcher::new()?,
            clock: MarketClock::default(),
            static_calendar: None,
            static_news: None,
            settings: ServiceSettings::default(),
        })
    }

    /// Builds the full pipeline from configuration with an in-memory cache.
    ///
    /// Providers without credentials are left out.
    ///
    /// # Errors
    /// Returns `FeedError::Configuration` for an unknown timezone or an
    /// unbuildable HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = HttpSettings::from(&config.providers);
        let clock = MarketClock::from_name(&config.session.exchange_timezone)?;
        let mut service = Self::new(
            Arc::new(MemoryCache::new()),
            FallbackClassifier::from_config(&config.classifier)?,
        )?
        .with_clock(clock)
        .with_settings(ServiceSettings::from(config));

        if let Some(key) = non_blank(config.providers.finnhub_api_key.as_deref()) {
            service = service.with_news_provider(Arc::new(FinnhubNewsProvider::new(key, http)?));
        }
        if let Some(key) = non_blank(config.providers.fmp_api_key.as_deref()) {
            service = service.with_calendar_provider(Arc::new(FmpCalendarProvider::new(key, http)?));
        }
        if config.providers.fair_economy_enabled {
            service = service
                .with_calendar_provider(Arc::new(FairEconomyCalendarProvider::new(http)?));
        }
        if config.providers.use_static_fallback {
            service = service.with_static_fallback(StaticCalendar::new(clock.timezone()));
        }

        tracing::info!(
            "Feed service ready: {} news providers, {} calendar providers, LLM classifier: {}",
            service.news_providers.len(),
            service.calendar_providers.len(),
            service.classifier.has_primary()
        );
        Ok(service)
    }

    #[must_use]
    pub fn with_news_provider(mut self, provider: Arc<dyn NewsProvider>) -> Self {
        self.news_providers.push(provider);
        self
    }

    #[must_use]
    pub fn with_calendar_provider(mut self, provider: Arc<dyn CalendarProvider>) -> Self {
        self.calendar_providers.push(provider);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: MarketClock) -> Self {
        self.clock = clock;
        self
    }

    /// Serves the built-in calendar and news sets when every provider fails.
    #[must_use]
    pub fn with_static_fallback(mut self, calendar: StaticCalendar) -> Self {
        self.static_calendar = Some(calendar);
        self.static_news = Some(StaticNews::new());
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn cache(&self) -> Arc<dyn CacheStore> {
        Arc::clone(&self.cache)
    }

    #[must_use]
    pub fn clock(&self) -> &MarketClock {
        &self.clock
    }

    // ========== News ==========

    /// Scored, deduplicated and ordered news for `query`.
    ///
    /// Pages slice one cached fetch per category: page `n` holds items
    /// `(n-1)*limit..n*limit` of the ordered feed.
    ///
    /// # Errors
    /// Returns `FeedError::Serialization` if a cached payload cannot be encoded.
    pub async fn news(
        &self,
        query: &NewsQuery,
        portfolio: &[PortfolioAsset],
        now: DateTime<Utc>,
    ) -> Result<NewsFeed> {
        let key = CacheKey::new(format!("news/{}", query.category), 0, "latest");

        let (mut items, meta) = match self.cached::<Vec<NewsItem>>(&key, now).await {
            Some(items) => {
                tracing::debug!("News cache hit for {}", key);
                (items, FeedMeta::default())
            }
            None => self.refresh_news(query, &key, now).await?,
        };

        self.enrich(&mut items, portfolio);
        sort_news(&mut items);
        let offset = (query.page.max(1) as usize - 1).saturating_mul(query.limit);
        let items = items.into_iter().skip(offset).take(query.limit).collect();
        Ok(NewsFeed { items, meta })
    }

    async fn refresh_news(
        &self,
        query: &NewsQuery,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<(Vec<NewsItem>, FeedMeta)> {
        let merged = self.fetch_news(query).await;
        let mut meta = FeedMeta::from_merge(&merged);

        if merged.all_failed {
            if let Some(items) = self.stale::<Vec<NewsItem>>(key).await {
                tracing::warn!("All news providers failed, serving stale {}", key);
                meta.stale = true;
                return Ok((items, meta));
            }
            if let Some(fallback) = &self.static_news {
                tracing::warn!("All news providers failed, serving static news");
                meta.fallback = true;
                return Ok((self.process_news(fallback.items(now)).await, meta));
            }
            tracing::warn!("All news providers failed and nothing is cached for {}", key);
            return Ok((Vec::new(), meta));
        }

        let items = self.process_news(merged.items).await;
        tracing::info!("Fetched {} relevant news items for {}", items.len(), key);
        self.store(key.clone(), &items, self.settings.news_ttl, now).await?;
        Ok((items, meta))
    }

    async fn fetch_news(&self, query: &NewsQuery) -> Merged<RawNewsItem> {
        let timeout = self.settings.fetch_timeout;
        let calls = self.news_providers.iter().map(|provider| async move {
            let name = provider.name().to_string();
            let result = tokio::time::timeout(timeout, provider.fetch_news(query))
                .await
                .unwrap_or_else(|_| Err(FeedError::timeout(&name, timeout.as_millis() as u64)));
            SourceOutcome::new(name, result)
        });
        merge_sources(join_all(calls).await)
    }

    /// Classifies, drops irrelevant items and dedups in provider order.
    async fn process_news(&self, raw: Vec<RawNewsItem>) -> Vec<NewsItem> {
        let texts: Vec<String> = raw.iter().map(RawNewsItem::text).collect();
        let classifications = join_all(texts.iter().map(|t| self.classifier.classify_text(t))).await;

        let items: Vec<NewsItem> = raw
            .into_iter()
            .zip(classifications)
            .filter(|(item, c)| {
                if !c.is_relevant {
                    tracing::debug!("Dropping irrelevant item: {}", item.title);
                }
                c.is_relevant
            })
            .map(|(item, c)| normalize_news(item, c))
            .collect();
        dedup_by_key(items, news_key)
    }

    fn enrich(&self, items: &mut [NewsItem], portfolio: &[PortfolioAsset]) {
        let symbols: Vec<String> = portfolio.iter().map(|a| a.symbol.clone()).collect();
        let tickers = (!symbols.is_empty()).then_some(symbols.as_slice());
        for item in items {
            item.portfolio_matches = self.matcher.matched_symbols(&item.text(), portfolio);
            item.edge_score = Some(self.scorer.score_item(item, tickers));
        }
    }

    // ========== Calendar ==========

    /// Upcoming calendar events for `query`, sorted and grouped by day.
    ///
    /// # Errors
    /// Returns `FeedError::Serialization` if a cached payload cannot be encoded.
    pub async fn calendar(&self, query: &CalendarQuery, now: DateTime<Utc>) -> Result<CalendarFeed> {
        let key = CacheKey::new("calendar", 0, query.range_key());

        let (mut events, meta) = match self.cached::<Vec<CalendarEvent>>(&key, now).await {
            Some(events) => {
                tracing::debug!("Calendar cache hit for {}", key);
                (events, FeedMeta::default())
            }
            None => self.refresh_calendar(query, &key, now).await?,
        };

        relabel(&mut events, &self.clock, now);
        let mut events = filter_events(
            events,
            query,
            &self.clock,
            self.settings.same_day_cutoff_hour,
            now,
        );
        sort_events(&mut events);
        let groups = group_by_date(events.clone(), &self.clock, now);
        Ok(CalendarFeed {
            events,
            groups,
            meta,
        })
    }

    async fn refresh_calendar(
        &self,
        query: &CalendarQuery,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<(Vec<CalendarEvent>, FeedMeta)> {
        let merged = self.fetch_calendar(query).await;
        let mut meta = FeedMeta::from_merge(&merged);

        if merged.all_failed {
            if let Some(events) = self.stale::<Vec<CalendarEvent>>(key).await {
                tracing::warn!("All calendar providers failed, serving stale {}", key);
                meta.stale = true;
                return Ok((events, meta));
            }
            if let Some(fallback) = &self.static_calendar {
                tracing::warn!("All calendar providers failed, serving static calendar");
                meta.fallback = true;
                return Ok((self.process_calendar(fallback.records_for(query), now), meta));
            }
            tracing::warn!("All calendar providers failed and no fallback is enabled");
            return Ok((Vec::new(), meta));
        }

        let events = self.process_calendar(merged.items, now);
        tracing::info!("Fetched {} calendar events for {}", events.len(), key);
        self.store(key.clone(), &events, self.settings.calendar_ttl, now).await?;
        Ok((events, meta))
    }

    async fn fetch_calendar(&self, query: &CalendarQuery) -> Merged<RawCalendarRecord> {
        let timeout = self.settings.fetch_timeout;
        let calls = self.calendar_providers.iter().map(|provider| async move {
            let name = provider.name().to_string();
            let result = tokio::time::timeout(timeout, provider.fetch_calendar(query))
                .await
                .unwrap_or_else(|_| Err(FeedError::timeout(&name, timeout.as_millis() as u64)));
            SourceOutcome::new(name, result)
        });
        merge_sources(join_all(calls).await)
    }

    fn process_calendar(&self, raw: Vec<RawCalendarRecord>, now: DateTime<Utc>) -> Vec<CalendarEvent> {
        let events: Vec<CalendarEvent> = raw
            .into_iter()
            .filter_map(|r| normalize_calendar(r, &self.clock, self.classifier.rules(), now))
            .collect();
        dedup_by_key(events, calendar_key)
    }

    // ========== Ad-hoc ==========

    /// Scores one item against a portfolio.
    #[must_use]
    pub fn score_item(&self, input: &ScoreInput, portfolio: &[PortfolioAsset]) -> EdgeScore {
        let symbols: Vec<String> = portfolio.iter().map(|a| a.symbol.clone()).collect();
        let tickers = (!symbols.is_empty()).then_some(symbols.as_slice());
        self.scorer.score(input, tickers)
    }

    /// Classifies free text through the fallback chain.
    pub async fn classify_text(&self, text: &str) -> Classification {
        self.classifier.classify_text(text).await
    }

    // ========== Cache helpers ==========

    async fn cached<T: DeserializeOwned>(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<T> {
        match self.cache.get(key, now).await {
            Ok(entry) => entry.and_then(|e| decode_entry(&e)),
            Err(e) => {
                tracing::warn!(error = %e, "Cache read failed for {}", key);
                None
            }
        }
    }

    async fn stale<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.cache.get_stale(key).await {
            Ok(entry) => entry.and_then(|e| decode_entry(&e)),
            Err(e) => {
                tracing::warn!(error = %e, "Stale cache read failed for {}", key);
                None
            }
        }
    }

    async fn store<T: Serialize>(
        &self,
        key: CacheKey,
        value: &T,
        ttl: chrono::Duration,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let payload = serde_json::to_value(value)?;
        if let Err(e) = self.cache.set(key, payload, ttl, now).await {
            tracing::warn!(error = %e, "Cache write failed");
        }
        Ok(())
    }
}

fn decode_entry<T: DeserializeOwned>(entry: &edge_feed_core::CacheEntry) -> Option<T> {
    match entry.decode() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding undecodable cache entry {}", entry.key);
            None
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
