//! Economic calendar data model.

use crate::session::SessionBucket;
use crate::topic::MarketTopic;
use serde::{Deserialize, Deserializer, Serialize};

/// Calendar event family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Economic,
    Crypto,
}

/// Event importance. Ordering is `High < Medium < Low` so ascending sorts put
/// the most important events first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    #[default]
    Low,
}

impl Importance {
    /// Maps provider impact labels ("High", "3", "holiday", ...) to an importance.
    #[must_use]
    pub fn from_impact(impact: &str) -> Self {
        match impact.trim().to_lowercase().as_str() {
            "high" | "3" | "red" => Importance::High,
            "medium" | "med" | "moderate" | "2" | "orange" => Importance::Medium,
            _ => Importance::Low,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::High => "high",
            Importance::Medium => "medium",
            Importance::Low => "low",
        }
    }
}

/// A calendar record as supplied by an ingestion provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCalendarRecord {
    pub title: String,
    /// Date or datetime string (`YYYY-MM-DD`, RFC 3339, or `YYYY-MM-DD HH:MM:SS` UTC)
    pub date: String,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub actual: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub estimate: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub previous: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub ticker: Option<String>,
}

impl RawCalendarRecord {
    /// Creates a record with a title and date string.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    #[must_use]
    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// A normalized calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Exchange-local `HH:MM`, or `TBD` for date-only events
    pub time: String,
    /// Display label ("Today", "Tomorrow", "Nov 26")
    pub date: String,
    /// Exchange-local calendar date `YYYY-MM-DD`
    pub date_key: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_hours: Option<SessionBucket>,
    #[serde(rename = "isUS")]
    pub is_us: bool,
    pub topic: MarketTopic,
}

impl CalendarEvent {
    /// Returns true once an actual value has been published.
    #[must_use]
    pub fn has_occurred(&self) -> bool {
        self.actual.as_deref().is_some_and(|a| !a.trim().is_empty())
    }

    /// Returns true if the event is US-scoped by flag or currency.
    #[must_use]
    pub fn is_us_scoped(&self) -> bool {
        self.is_us
            || self
                .currency
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case("USD"))
    }

    /// Key used for day grouping: `date_key`, or the raw label when absent.
    #[must_use]
    pub fn group_key(&self) -> &str {
        if self.date_key.is_empty() {
            &self.date
        } else {
            &self.date_key
        }
    }
}

/// Accepts a string, number or null; empty strings become `None`.
fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> CalendarEvent {
        CalendarEvent {
            id: "2024-11-26-cpi".to_string(),
            title: "CPI".to_string(),
            time: "08:30".to_string(),
            date: "Today".to_string(),
            date_key: "2024-11-26".to_string(),
            event_type: EventType::Economic,
            importance: Importance::High,
            actual: None,
            forecast: Some("2.6%".to_string()),
            previous: None,
            currency: Some("USD".to_string()),
            ticker: None,
            market_hours: Some(SessionBucket::PreMarket),
            is_us: false,
            topic: MarketTopic::Inflation,
        }
    }

    #[test]
    fn importance_orders_high_first() {
        let mut levels = vec![Importance::Low, Importance::High, Importance::Medium];
        levels.sort();
        assert_eq!(levels, vec![Importance::High, Importance::Medium, Importance::Low]);
    }

    #[test]
    fn importance_from_impact_labels() {
        assert_eq!(Importance::from_impact("High"), Importance::High);
        assert_eq!(Importance::from_impact("2"), Importance::Medium);
        assert_eq!(Importance::from_impact("Holiday"), Importance::Low);
        assert_eq!(Importance::from_impact(""), Importance::Low);
    }

    #[test]
    fn has_occurred_ignores_blank_actual() {
        let mut ev = event();
        assert!(!ev.has_occurred());
        ev.actual = Some("  ".to_string());
        assert!(!ev.has_occurred());
        ev.actual = Some("2.9%".to_string());
        assert!(ev.has_occurred());
    }

    #[test]
    fn usd_currency_counts_as_us_scope() {
        let mut ev = event();
        assert!(ev.is_us_scoped());
        ev.currency = Some("EUR".to_string());
        assert!(!ev.is_us_scoped());
    }

    #[test]
    fn raw_record_accepts_numeric_and_null_fields() {
        let json = r#"{
            "title": "Initial Jobless Claims",
            "date": "2024-11-27 13:30:00",
            "impact": "Medium",
            "actual": 213,
            "estimate": null,
            "previous": "",
            "currency": "USD",
            "country": "US"
        }"#;
        let raw: RawCalendarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(raw.actual.as_deref(), Some("213"));
        assert!(raw.estimate.is_none());
        assert!(raw.previous.is_none());
        assert!(raw.ticker.is_none());
    }

    #[test]
    fn calendar_event_serializes_wire_names() {
        let json = serde_json::to_value(event()).unwrap();
        assert_eq!(json["dateKey"], "2024-11-26");
        assert_eq!(json["type"], "economic");
        assert_eq!(json["isUS"], false);
        assert_eq!(json["marketHours"], "pre-market");
        assert!(json.get("actual").is_none());
    }
}
