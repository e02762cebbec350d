//! Built-in market primers served when every news provider fails.
//!
//! Evergreen items about the scheduled drivers of US markets, stamped with
//! the request time so the feed never goes blank.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use edge_feed_core::{NewsProvider, NewsQuery, RawNewsItem, Result};

const SOURCE: &str = "Edge Feed";

struct Primer {
    title: &'static str,
    summary: &'static str,
    keywords: &'static [&'static str],
}

const PRIMERS: &[Primer] = &[
    Primer {
        title: "Fed policy watch: FOMC rate decisions set the tone for Treasury yields",
        summary: "Federal Reserve meetings and Powell's press conferences move rate expectations, the dollar and equity multiples.",
        keywords: &["fed", "fomc", "rates"],
    },
    Primer {
        title: "Inflation watch: CPI and PCE reports shape the rate path",
        summary: "Monthly consumer price data feeds directly into how markets price future Fed moves.",
        keywords: &["inflation", "cpi", "pce"],
    },
    Primer {
        title: "Jobs data: nonfarm payrolls and jobless claims drive Fed expectations",
        summary: "A hot labor market keeps pressure on rates; a cooling one raises odds of a rate cut.",
        keywords: &["jobs", "payrolls"],
    },
    Primer {
        title: "Earnings season: S&P 500 guidance moves stocks more than headline beats",
        summary: "Forward guidance from large caps tends to outweigh the reported quarter.",
        keywords: &["earnings", "stocks"],
    },
];

/// Static fallback news.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticNews;

impl StaticNews {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Every primer, stamped at `now`.
    #[must_use]
    pub fn items(&self, now: DateTime<Utc>) -> Vec<RawNewsItem> {
        PRIMERS
            .iter()
            .map(|p| {
                RawNewsItem::new(p.title, SOURCE, now)
                    .with_summary(p.summary)
                    .with_keywords(p.keywords.iter().map(|k| (*k).to_string()).collect())
            })
            .collect()
    }
}

#[async_trait]
impl NewsProvider for StaticNews {
    async fn fetch_news(&self, _query: &NewsQuery) -> Result<Vec<RawNewsItem>> {
        Ok(self.items(Utc::now()))
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 25, 12, 0, 0).unwrap()
    }

    #[test]
    fn items_are_stamped_at_request_time() {
        let items = StaticNews::new().items(now());
        assert_eq!(items.len(), PRIMERS.len());
        assert!(items.iter().all(|i| i.timestamp == now() && i.url.is_empty()));
        assert!(items.iter().all(|i| !i.keywords.is_empty()));
    }

    #[test]
    fn titles_are_distinct() {
        let mut titles: Vec<&str> = PRIMERS.iter().map(|p| p.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), PRIMERS.len());
    }

    #[tokio::test]
    async fn provider_never_fails() {
        let provider = StaticNews::new();
        let items = provider.fetch_news(&NewsQuery::default()).await.unwrap();
        assert_eq!(items.len(), PRIMERS.len());
        assert_eq!(provider.name(), "static");
    }
}
