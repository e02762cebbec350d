//! FairEconomy weekly calendar feed (keyless).

use super::{json_text, HttpSettings, JsonArraySource};
use async_trait::async_trait;
use edge_feed_core::{CalendarProvider, CalendarQuery, RawCalendarRecord, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Default feed host.
pub const FAIR_ECONOMY_URL: &str = "https://nfs.faireconomy.media";

const THIS_WEEK_PATH: &str = "/ff_calendar_thisweek.json";

#[derive(Debug, Deserialize)]
struct FairEconomyEvent {
    title: String,
    /// Currency code, despite the field name
    #[serde(default)]
    country: Option<String>,
    /// RFC 3339 with offset
    date: String,
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
}

impl FairEconomyEvent {
    fn into_record(self) -> Option<RawCalendarRecord> {
        if self.title.trim().is_empty() || self.date.trim().is_empty() {
            return None;
        }
        let currency = self
            .country
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty() && c != "ALL");
        let country = currency.as_deref().and_then(country_for_currency).map(str::to_string);

        Some(RawCalendarRecord {
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            impact: json_text(self.values.get("impact")),
            actual: json_text(self.values.get("actual")),
            estimate: json_text(self.values.get("forecast")),
            previous: json_text(self.values.get("previous")),
            currency,
            country,
            ticker: None,
        })
    }
}

fn country_for_currency(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("US"),
        "EUR" => Some("EU"),
        "GBP" => Some("GB"),
        "JPY" => Some("JP"),
        "CAD" => Some("CA"),
        "AUD" => Some("AU"),
        "NZD" => Some("NZ"),
        "CHF" => Some("CH"),
        "CNY" => Some("CN"),
        _ => None,
    }
}

/// Current-week calendar; the query window is applied downstream.
pub struct FairEconomyCalendarProvider {
    source: JsonArraySource,
}

impl FairEconomyCalendarProvider {
    /// # Errors
    /// Returns `FeedError::Configuration` if the HTTP client cannot be built.
    pub fn new(settings: HttpSettings) -> Result<Self> {
        Ok(Self {
            source: JsonArraySource::new("fair_economy", FAIR_ECONOMY_URL, settings)?,
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.source = self.source.with_base_url(url);
        self
    }
}

#[async_trait]
impl CalendarProvider for FairEconomyCalendarProvider {
    async fn fetch_calendar(&self, _query: &CalendarQuery) -> Result<Vec<RawCalendarRecord>> {
        let events: Vec<FairEconomyEvent> = self.source.get_array(THIS_WEEK_PATH, &[]).await?;
        Ok(events
            .into_iter()
            .filter_map(FairEconomyEvent::into_record)
            .collect())
    }

    fn name(&self) -> &str {
        self.source.name()
    }
}
