//! Multi-source merge, dedup, filtering and ordering.

pub mod calendar;
pub mod dedup;
pub mod news;

pub use calendar::{filter_events, group_by_date, is_central_bank_event, sort_events, DayGroup};
pub use dedup::{calendar_key, canonical_url, dedup_by_key, news_key, normalize_title};
pub use news::{is_us_story, mentions_central_bank, sort_news};

use edge_feed_core::Result;

/// One provider's fetch result.
#[derive(Debug)]
pub struct SourceOutcome<T> {
    pub source: String,
    pub result: Result<Vec<T>>,
}

impl<T> SourceOutcome<T> {
    pub fn new(source: impl Into<String>, result: Result<Vec<T>>) -> Self {
        Self {
            source: source.into(),
            result,
        }
    }
}

/// Items from every provider that answered, in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<T> {
    pub items: Vec<T>,
    pub sources_ok: Vec<String>,
    pub sources_failed: Vec<String>,
    /// No provider answered.
    pub all_failed: bool,
}

/// Concatenates successful results and skips failed providers.
///
/// A provider that answers with an empty list still counts as answered.
pub fn merge_sources<T>(outcomes: Vec<SourceOutcome<T>>) -> Merged<T> {
    let mut items = Vec::new();
    let mut sources_ok = Vec::new();
    let mut sources_failed = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(batch) => {
                tracing::debug!("{} returned {} items", outcome.source, batch.len());
                items.extend(batch);
                sources_ok.push(outcome.source);
            }
            Err(e) => {
                if e.is_skippable() {
                    tracing::warn!("Skipping provider {}: {}", outcome.source, e);
                } else {
                    tracing::warn!(error = %e, "Provider {} failed unexpectedly", outcome.source);
                }
                sources_failed.push(outcome.source);
            }
        }
    }

    let all_failed = sources_ok.is_empty();
    Merged {
        items,
        sources_ok,
        sources_failed,
        all_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use edge_feed_core::{FeedError, NewsItem, Sentiment};

    fn story(id: &str, title: &str, url: &str) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: title.to_string(),
            summary: String::new(),
            category: "general".to_string(),
            sentiment: Sentiment::Neutral,
            relevance_score: 40,
            trading_signal: None,
            source: "wire".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 11, 26, 14, 0, 0).unwrap(),
            url: url.to_string(),
            source_quality: None,
            keywords: vec![],
            topics: vec![],
            reasons: vec![],
            edge_score: None,
            portfolio_matches: vec![],
        }
    }

    #[test]
    fn failed_sources_are_skipped() {
        let merged = merge_sources(vec![
            SourceOutcome::new("a", Ok(vec![1, 2])),
            SourceOutcome::new("b", Err(FeedError::timeout("b", 8000))),
            SourceOutcome::new("c", Ok(vec![3])),
        ]);
        assert_eq!(merged.items, vec![1, 2, 3]);
        assert_eq!(merged.sources_ok, vec!["a", "c"]);
        assert_eq!(merged.sources_failed, vec!["b"]);
        assert!(!merged.all_failed);
    }

    #[test]
    fn all_failed_is_flagged() {
        let merged: Merged<u8> = merge_sources(vec![
            SourceOutcome::new("a", Err(FeedError::upstream("a", "HTTP 503"))),
            SourceOutcome::new("b", Err(FeedError::malformed("b", "not an array"))),
        ]);
        assert!(merged.items.is_empty());
        assert!(merged.all_failed);
    }

    #[test]
    fn empty_answer_is_not_a_failure() {
        let merged: Merged<u8> = merge_sources(vec![SourceOutcome::new("a", Ok(vec![]))]);
        assert!(!merged.all_failed);
    }

    #[test]
    fn dedup_and_sort_are_idempotent() {
        let items = vec![
            story("1", "Fed Holds Rates Steady", ""),
            story("2", "fed holds rates, steady!", ""),
            story("3", "Oil jumps", "https://www.reuters.com/oil/?utm_source=tw"),
            story("4", "Oil jumps on supply fears", "http://reuters.com/oil"),
        ];

        let mut once = dedup_by_key(items, news_key);
        sort_news(&mut once);
        let mut twice = dedup_by_key(once.clone(), news_key);
        sort_news(&mut twice);

        let ids: Vec<&str> = once.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(once, twice);
    }
}
