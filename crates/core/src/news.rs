//! News data model.
//!
//! `RawNewsItem` is what ingestion hands over; `NewsItem` is the enriched,
//! scored item served to presentation.

use crate::score::EdgeScore;
use crate::topic::MarketTopic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional tone of a news item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Returns the sentiment as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Parses provider spellings ("positive", "bearish", ...). Unknown values are neutral.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bullish" | "positive" => Sentiment::Bullish,
            "bearish" | "negative" => Sentiment::Bearish,
            _ => Sentiment::Neutral,
        }
    }

    /// Returns true unless neutral.
    #[must_use]
    pub fn is_directional(&self) -> bool {
        !matches!(self, Sentiment::Neutral)
    }
}

/// A news article as supplied by an ingestion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsItem {
    /// Provider-side identifier, if any
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub source: String,
    /// Provider quality heuristic (0-100)
    #[serde(default)]
    pub source_quality: Option<u8>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Provider category label (e.g., "general", "forex")
    #[serde(default)]
    pub category: Option<String>,
    /// Provider sentiment, when the feed carries one
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

impl RawNewsItem {
    /// Creates a raw item with the required fields.
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            summary: String::new(),
            source: source.into(),
            source_quality: None,
            timestamp,
            url: String::new(),
            keywords: Vec::new(),
            category: None,
            sentiment: None,
        }
    }

    /// Builder method to add a summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Builder method to add a URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder method to add a source quality heuristic.
    #[must_use]
    pub fn with_source_quality(mut self, quality: u8) -> Self {
        self.source_quality = Some(quality.min(100));
        self
    }

    /// Builder method to add keywords.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Builder method to add a provider sentiment.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    /// Title, summary and keywords joined into one classification text.
    #[must_use]
    pub fn text(&self) -> String {
        join_text(&self.title, &self.summary, &self.keywords)
    }
}

/// A classified, scored news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub sentiment: Sentiment,
    /// Classifier relevance (0-100)
    pub relevance_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_signal: Option<String>,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub topics: Vec<MarketTopic>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_score: Option<EdgeScore>,
    /// Portfolio symbols this item mentions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub portfolio_matches: Vec<String>,
}

impl NewsItem {
    /// Title, summary and keywords joined into one text for matching.
    #[must_use]
    pub fn text(&self) -> String {
        join_text(&self.title, &self.summary, &self.keywords)
    }

    /// Impact used for ordering: the EdgeScore when scored, otherwise relevance.
    #[must_use]
    pub fn impact(&self) -> u8 {
        self.edge_score
            .as_ref()
            .map(|e| e.score)
            .unwrap_or(self.relevance_score)
    }

    /// Returns true if the item mentions any portfolio symbol.
    #[must_use]
    pub fn in_portfolio(&self) -> bool {
        !self.portfolio_matches.is_empty()
    }
}

fn join_text(title: &str, summary: &str, keywords: &[String]) -> String {
    let mut text = String::with_capacity(title.len() + summary.len() + 16);
    text.push_str(title);
    if !summary.is_empty() {
        text.push(' ');
        text.push_str(summary);
    }
    for keyword in keywords {
        text.push(' ');
        text.push_str(keyword);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sentiment_parse_accepts_provider_spellings() {
        assert_eq!(Sentiment::parse("Positive"), Sentiment::Bullish);
        assert_eq!(Sentiment::parse("bearish"), Sentiment::Bearish);
        assert_eq!(Sentiment::parse("mixed"), Sentiment::Neutral);
        assert!(!Sentiment::Neutral.is_directional());
        assert!(Sentiment::Bearish.is_directional());
    }

    #[test]
    fn raw_text_joins_title_summary_keywords() {
        let ts = Utc.with_ymd_and_hms(2024, 11, 26, 14, 0, 0).unwrap();
        let raw = RawNewsItem::new("Fed holds", "Reuters", ts)
            .with_summary("Rates unchanged")
            .with_keywords(vec!["fomc".to_string()]);

        assert_eq!(raw.text(), "Fed holds Rates unchanged fomc");
    }

    #[test]
    fn source_quality_is_capped() {
        let ts = Utc.with_ymd_and_hms(2024, 11, 26, 14, 0, 0).unwrap();
        let raw = RawNewsItem::new("t", "s", ts).with_source_quality(250);
        assert_eq!(raw.source_quality, Some(100));
    }

    #[test]
    fn raw_item_deserializes_camel_case() {
        let json = r#"{
            "title": "CPI beats",
            "source": "cnbc.com",
            "sourceQuality": 80,
            "timestamp": "2024-11-26T13:30:00Z",
            "url": "https://cnbc.com/a"
        }"#;
        let raw: RawNewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(raw.source_quality, Some(80));
        assert!(raw.keywords.is_empty());
        assert!(raw.sentiment.is_none());
    }
}
