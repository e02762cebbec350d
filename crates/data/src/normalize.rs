//! Raw provider records to served models.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use edge_feed_core::{
    CalendarEvent, Classification, EventType, Importance, MarketTopic, NewsItem, RawCalendarRecord,
    RawNewsItem,
};
use edge_feed_signals::taxonomy::CRYPTO_TERMS;
use edge_feed_signals::text::{any_term, normalize};
use edge_feed_signals::{
    date_key, parse_date_key, resolve_sentiment, MarketClock, RuleClassifier, UNKNOWN_TIME,
};
use sha2::{Digest, Sha256};

const CRYPTO_CURRENCIES: &[&str] = &["BTC", "ETH", "SOL", "USDT", "USDC", "XRP"];
const US_COUNTRIES: &[&str] = &["US", "USA", "UNITED STATES"];

/// Short stable id from a prefix and a key.
#[must_use]
pub fn stable_id(prefix: &str, key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{prefix}-{}", &hex::encode(digest)[..16])
}

/// Builds a served news item from a raw item and its classification.
#[must_use]
pub fn normalize_news(raw: RawNewsItem, classification: Classification) -> NewsItem {
    let text = raw.text();
    let id = raw.id.clone().unwrap_or_else(|| {
        let key = if raw.url.trim().is_empty() {
            normalize(&raw.title)
        } else {
            raw.url.trim().to_string()
        };
        stable_id("news", &key)
    });
    let sentiment = resolve_sentiment(raw.sentiment, &text);
    let category = raw
        .category
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| classification.primary_topic().map(|t| t.as_str().to_string()))
        .unwrap_or_else(|| "general".to_string());

    NewsItem {
        id,
        title: raw.title,
        summary: raw.summary,
        category,
        sentiment,
        relevance_score: classification.score,
        trading_signal: classification.trading_signal,
        source: raw.source,
        timestamp: raw.timestamp,
        url: raw.url,
        source_quality: raw.source_quality,
        keywords: raw.keywords,
        topics: classification.topics,
        reasons: classification.reasons,
        edge_score: None,
        portfolio_matches: Vec::new(),
    }
}

/// When a calendar record happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTiming {
    At(DateTime<Utc>),
    DateOnly(NaiveDate),
}

/// Parses RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or a bare `YYYY-MM-DD`.
///
/// A bare date is a local calendar date and is never converted through an instant.
#[must_use]
pub fn parse_event_timing(raw: &str) -> Option<EventTiming> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(EventTiming::At(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(EventTiming::At(naive.and_utc()));
        }
    }
    if raw.len() == 10 {
        return parse_date_key(raw).map(EventTiming::DateOnly);
    }
    None
}

/// Normalizes a calendar record; `None` if its date can't be parsed.
#[must_use]
pub fn normalize_calendar(
    raw: RawCalendarRecord,
    clock: &MarketClock,
    rules: &RuleClassifier,
    now: DateTime<Utc>,
) -> Option<CalendarEvent> {
    let Some(timing) = parse_event_timing(&raw.date) else {
        tracing::debug!("Dropping calendar record with unparseable date: {:?}", raw.date);
        return None;
    };

    let (date, time, market_hours) = match timing {
        EventTiming::At(instant) => (
            clock.local_date(instant),
            clock.time_label(instant),
            Some(clock.session(instant)),
        ),
        EventTiming::DateOnly(date) => (date, UNKNOWN_TIME.to_string(), None),
    };
    let key = date_key(date);

    let currency = raw.currency.map(|c| c.trim().to_uppercase());
    let title_lower = normalize(&raw.title);
    let event_type = if currency
        .as_deref()
        .is_some_and(|c| CRYPTO_CURRENCIES.contains(&c))
        || any_term(&title_lower, CRYPTO_TERMS)
    {
        EventType::Crypto
    } else {
        EventType::Economic
    };
    let is_us = raw
        .country
        .as_deref()
        .is_some_and(|c| US_COUNTRIES.contains(&c.trim().to_uppercase().as_str()))
        || currency.as_deref() == Some("USD");
    let topic = rules
        .evaluate(&raw.title)
        .primary_topic()
        .unwrap_or(MarketTopic::Inflation);

    Some(CalendarEvent {
        id: stable_id("cal", &format!("{title_lower}|{key}")),
        title: raw.title,
        time,
        date: clock.label_for(date, now),
        date_key: key,
        event_type,
        importance: Importance::from_impact(raw.impact.as_deref().unwrap_or_default()),
        actual: raw.actual,
        forecast: raw.estimate,
        previous: raw.previous,
        currency,
        ticker: raw.ticker,
        market_hours,
        is_us,
        topic,
    })
}

/// Recomputes display labels for events read back from the cache.
pub fn relabel(events: &mut [CalendarEvent], clock: &MarketClock, now: DateTime<Utc>) {
    for event in events {
        if let Some(date) = parse_date_key(&event.date_key) {
            event.date = clock.label_for(date, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use edge_feed_core::{SessionBucket, Sentiment};

    fn now() -> DateTime<Utc> {
        // 09:00 EST on Tuesday Nov 26 2024
        Utc.with_ymd_and_hms(2024, 11, 26, 14, 0, 0).unwrap()
    }

    fn rules() -> RuleClassifier {
        RuleClassifier::new().unwrap()
    }

    // ========== News Tests ==========

    #[test]
    fn news_gets_stable_id_and_inferred_sentiment() {
        let raw = RawNewsItem::new("Nvidia shares surge", "Reuters", now())
            .with_url("https://reuters.com/a");
        let classification = rules().evaluate(&raw.text());
        let item = normalize_news(raw.clone(), classification.clone());
        let again = normalize_news(raw, classification);

        assert_eq!(item.id, again.id);
        assert!(item.id.starts_with("news-"));
        assert_eq!(item.sentiment, Sentiment::Bullish);
        assert!(item.relevance_score > 0);
    }

    #[test]
    fn news_category_falls_back_to_topic() {
        let raw = RawNewsItem::new("CPI inflation cools", "x", now());
        let item = normalize_news(raw.clone(), rules().evaluate(&raw.text()));
        assert_eq!(item.category, "inflation");

        let item = normalize_news(raw, Classification::default());
        assert_eq!(item.category, "general");
    }

    #[test]
    fn provider_id_is_kept() {
        let mut raw = RawNewsItem::new("Headline", "x", now());
        raw.id = Some("finnhub-1".to_string());
        assert_eq!(normalize_news(raw, Classification::default()).id, "finnhub-1");
    }

    // ========== Calendar Tests ==========

    #[test]
    fn timed_event_uses_exchange_time() {
        let raw = RawCalendarRecord::new("CPI YoY", "2024-11-26 13:30:00")
            .with_impact("High")
            .with_currency("usd");
        let event = normalize_calendar(raw, &MarketClock::default(), &rules(), now()).unwrap();

        assert_eq!(event.time, "08:30");
        assert_eq!(event.date_key, "2024-11-26");
        assert_eq!(event.date, "Today");
        assert_eq!(event.market_hours, Some(SessionBucket::PreMarket));
        assert_eq!(event.importance, Importance::High);
        assert_eq!(event.currency.as_deref(), Some("USD"));
        assert!(event.is_us);
        assert_eq!(event.topic, MarketTopic::Inflation);
    }

    #[test]
    fn late_utc_instant_keeps_local_date() {
        // 02:00 UTC on the 27th is 21:00 on the 26th in New York
        let raw = RawCalendarRecord::new("Fed Chair Speaks", "2024-11-27T02:00:00Z");
        let event = normalize_calendar(raw, &MarketClock::default(), &rules(), now()).unwrap();
        assert_eq!(event.date_key, "2024-11-26");
        assert_eq!(event.topic, MarketTopic::Rates);
    }

    #[test]
    fn date_only_event_is_tbd() {
        let raw = RawCalendarRecord::new("Bank Holiday", "2024-11-27").with_impact("holiday");
        let event = normalize_calendar(raw, &MarketClock::default(), &rules(), now()).unwrap();
        assert_eq!(event.time, UNKNOWN_TIME);
        assert_eq!(event.date_key, "2024-11-27");
        assert_eq!(event.date, "Tomorrow");
        assert!(event.market_hours.is_none());
        assert_eq!(event.importance, Importance::Low);
    }

    #[test]
    fn crypto_events_are_typed() {
        let raw = RawCalendarRecord::new("Ethereum mainnet upgrade", "2024-11-29");
        let event = normalize_calendar(raw, &MarketClock::default(), &rules(), now()).unwrap();
        assert_eq!(event.event_type, EventType::Crypto);
        assert!(!event.is_us);
    }

    #[test]
    fn garbage_date_is_dropped() {
        let raw = RawCalendarRecord::new("Mystery", "next tuesday");
        assert!(normalize_calendar(raw, &MarketClock::default(), &rules(), now()).is_none());
    }

    #[test]
    fn relabel_tracks_now() {
        let raw = RawCalendarRecord::new("GDP", "2024-11-27");
        let mut events = vec![normalize_calendar(raw, &MarketClock::default(), &rules(), now()).unwrap()];
        relabel(&mut events, &MarketClock::default(), now() + chrono::Duration::days(1));
        assert_eq!(events[0].date, "Today");
    }
}
