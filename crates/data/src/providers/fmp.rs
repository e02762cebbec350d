//! Financial Modeling Prep economic calendar.

use super::{json_text, HttpSettings, JsonArraySource};
use async_trait::async_trait;
use edge_feed_core::{CalendarProvider, CalendarQuery, RawCalendarRecord, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Default FMP REST base URL.
pub const FMP_API_URL: &str = "https://financialmodelingprep.com/api/v3";

#[derive(Debug, Deserialize)]
struct FmpEvent {
    event: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC
    date: String,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    /// Numeric fields arrive as numbers, strings or null
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl FmpEvent {
    fn into_record(self) -> Option<RawCalendarRecord> {
        if self.event.trim().is_empty() || self.date.trim().is_empty() {
            return None;
        }
        Some(RawCalendarRecord {
            title: self.event.trim().to_string(),
            date: self.date.trim().to_string(),
            impact: json_text(self.values.get("impact")),
            actual: json_text(self.values.get("actual")),
            estimate: json_text(self.values.get("estimate")),
            previous: json_text(self.values.get("previous")),
            currency: self.currency.filter(|c| !c.trim().is_empty()),
            country: self.country.filter(|c| !c.trim().is_empty()),
            ticker: None,
        })
    }
}

/// Calendar from FMP's `/economic_calendar` endpoint.
pub struct FmpCalendarProvider {
    source: JsonArraySource,
    api_key: String,
}

impl FmpCalendarProvider {
    /// # Errors
    /// Returns `FeedError::Configuration` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, settings: HttpSettings) -> Result<Self> {
        Ok(Self {
            source: JsonArraySource::new("fmp", FMP_API_URL, settings)?,
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
}

#[async_trait]
impl CalendarProvider for FmpCalendarProvider {
    async fn fetch_calendar(&self, query: &CalendarQuery) -> Result<Vec<RawCalendarRecord>> {
        let params = [
            ("from", query.from.format("%Y-%m-%d").to_string()),
            ("to", query.to.format("%Y-%m-%d").to_string()),
            ("apikey", self.api_key.clone()),
        ];
        let events: Vec<FmpEvent> = self.source.get_array("/economic_calendar", &params).await?;
        Ok(events.into_iter().filter_map(FmpEvent::into_record).collect())
    }

    fn name(&self) -> &str {
        self.source.name()
    }
}
