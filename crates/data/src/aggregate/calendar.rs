//! Calendar filtering, ordering and day grouping.

use chrono::{DateTime, NaiveDate, Utc};
use edge_feed_core::{CalendarEvent, CalendarQuery};
use edge_feed_signals::taxonomy::CENTRAL_BANK_TERMS;
use edge_feed_signals::text::{any_term, normalize};
use edge_feed_signals::{minutes_of_day, parse_date_key, MarketClock};
use serde::{Deserialize, Serialize};

/// Applies the calendar filters in order:
/// 1. drop events that already have an actual value
/// 2. drop events outside `[from, to]`
/// 3. drop today's events once the exchange clock has passed `cutoff_hour`
/// 4. with `us_only`, keep only US-scoped events
#[must_use]
pub fn filter_events(
    events: Vec<CalendarEvent>,
    query: &CalendarQuery,
    clock: &MarketClock,
    cutoff_hour: u32,
    now: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    let today = clock.today(now);
    let past_cutoff = clock.is_past_cutoff(now, cutoff_hour);

    events
        .into_iter()
        .filter(|e| !e.has_occurred())
        .filter(|e| parse_date_key(&e.date_key).is_some_and(|d| query.contains(d)))
        .filter(|e| !(past_cutoff && parse_date_key(&e.date_key) == Some(today)))
        .filter(|e| !query.us_only || e.is_us_scoped())
        .collect()
}

/// Returns true for Fed and named central-bank events.
#[must_use]
pub fn is_central_bank_event(event: &CalendarEvent) -> bool {
    any_term(&normalize(&event.title), CENTRAL_BANK_TERMS)
}

/// US first, central banks first, importance, time (unknown last), title.
pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by_cached_key(|e| {
        (
            !e.is_us_scoped(),
            !is_central_bank_event(e),
            e.importance,
            minutes_of_day(&e.time).unwrap_or(u32::MAX),
            e.title.to_lowercase(),
        )
    });
}

/// Events sharing a date key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub key: String,
    pub label: String,
    pub events: Vec<CalendarEvent>,
}

/// Groups events by date key: Today, Tomorrow, then chronological, with
/// unparseable keys last. Event order within a group is preserved.
#[must_use]
pub fn group_by_date(
    events: Vec<CalendarEvent>,
    clock: &MarketClock,
    now: DateTime<Utc>,
) -> Vec<DayGroup> {
    let today = clock.today(now);
    let tomorrow = clock.tomorrow(now);

    let mut groups: Vec<DayGroup> = Vec::new();
    for event in events {
        let key = event.group_key().to_string();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.events.push(event),
            None => {
                let label = parse_date_key(&key)
                    .map(|d| clock.label_for(d, now))
                    .unwrap_or_else(|| event.date.clone());
                groups.push(DayGroup {
                    key,
                    label,
                    events: vec![event],
                });
            }
        }
    }

    groups.sort_by_cached_key(|g| group_rank(&g.key, today, tomorrow));
    groups
}

fn group_rank(key: &str, today: NaiveDate, tomorrow: NaiveDate) -> (u8, Option<NaiveDate>, String) {
    match parse_date_key(key) {
        Some(d) if d == today => (0, None, String::new()),
        Some(d) if d == tomorrow => (1, None, String::new()),
        Some(d) => (2, Some(d), String::new()),
        None => (3, None, key.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use edge_feed_core::{EventType, Importance, MarketTopic};

    fn event(title: &str, date_key: &str, time: &str, importance: Importance) -> CalendarEvent {
        CalendarEvent {
            id: format!("{title}-{date_key}"),
            title: title.to_string(),
            time: time.to_string(),
            date: date_key.to_string(),
            date_key: date_key.to_string(),
            event_type: EventType::Economic,
            importance,
            actual: None,
            forecast: None,
            previous: None,
            currency: Some("USD".to_string()),
            ticker: None,
            market_hours: None,
            is_us: true,
            topic: MarketTopic::Inflation,
        }
    }

    fn at_ny(hour: u32) -> DateTime<Utc> {
        chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 11, 26, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn week() -> CalendarQuery {
        CalendarQuery::new(
            NaiveDate::from_ymd_opt(2024, 11, 26).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 2).unwrap(),
        )
    }

    // ========== Filter Tests ==========

    #[test]
    fn published_actual_is_excluded() {
        let mut cpi = event("CPI", "2024-11-26", "08:30", Importance::High);
        cpi.actual = Some("2.9%".to_string());
        let out = filter_events(vec![cpi], &week(), &MarketClock::default(), 12, at_ny(7));
        assert!(out.is_empty());
    }

    #[test]
    fn window_is_inclusive() {
        let events = vec![
            event("A", "2024-11-25", "08:30", Importance::High),
            event("B", "2024-11-26", "15:00", Importance::High),
            event("C", "2024-12-02", "08:30", Importance::High),
            event("D", "2024-12-03", "08:30", Importance::High),
        ];
        let out = filter_events(events, &week(), &MarketClock::default(), 12, at_ny(7));
        let titles: Vec<&str> = out.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn same_day_cutoff() {
        let events = vec![
            event("Today", "2024-11-26", "15:00", Importance::High),
            event("Tomorrow", "2024-11-27", "08:30", Importance::High),
        ];
        let morning = filter_events(events.clone(), &week(), &MarketClock::default(), 12, at_ny(11));
        assert_eq!(morning.len(), 2);

        let afternoon = filter_events(events, &week(), &MarketClock::default(), 12, at_ny(12));
        assert_eq!(afternoon.len(), 1);
        assert_eq!(afternoon[0].title, "Tomorrow");
    }

    #[test]
    fn us_only_scope() {
        let mut ecb = event("ECB Rate Decision", "2024-11-27", "07:45", Importance::High);
        ecb.is_us = false;
        ecb.currency = Some("EUR".to_string());
        let mut usd_only = event("Treasury Auction", "2024-11-27", "13:00", Importance::Low);
        usd_only.is_us = false;

        let events = vec![ecb, usd_only];
        let all = filter_events(events.clone(), &week(), &MarketClock::default(), 12, at_ny(7));
        assert_eq!(all.len(), 2);

        let us = filter_events(events, &week().us_only(true), &MarketClock::default(), 12, at_ny(7));
        assert_eq!(us.len(), 1);
        assert_eq!(us[0].title, "Treasury Auction");
    }

    // ========== Sort Tests ==========

    #[test]
    fn sort_order() {
        let mut ecb = event("ECB Rate Decision", "2024-11-27", "07:45", Importance::High);
        ecb.is_us = false;
        ecb.currency = Some("EUR".to_string());
        let mut events = vec![
            ecb,
            event("Crude Oil Inventories", "2024-11-27", "10:30", Importance::Low),
            event("GDP", "2024-11-27", TBD, Importance::High),
            event("Durable Goods", "2024-11-27", "08:30", Importance::High),
            event("FOMC Minutes", "2024-11-27", "14:00", Importance::Medium),
        ];
        sort_events(&mut events);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "FOMC Minutes",
                "Durable Goods",
                "GDP",
                "Crude Oil Inventories",
                "ECB Rate Decision"
            ]
        );
    }

    const TBD: &str = edge_feed_signals::UNKNOWN_TIME;

    // ========== Grouping Tests ==========

    #[test]
    fn groups_today_tomorrow_then_chronological() {
        let mut odd = event("Undated", "", TBD, Importance::Low);
        odd.date = "Someday".to_string();
        let events = vec![
            event("Later", "2024-11-29", "08:30", Importance::Low),
            odd,
            event("Tomorrow", "2024-11-27", "08:30", Importance::Low),
            event("Next", "2024-11-28", "08:30", Importance::Low),
            event("Today", "2024-11-26", "15:00", Importance::Low),
            event("Today 2", "2024-11-26", "16:00", Importance::Low),
        ];
        let groups = group_by_date(events, &MarketClock::default(), at_ny(9));
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Tomorrow", "Nov 28", "Nov 29", "Someday"]);
        assert_eq!(groups[0].events.len(), 2);
        assert_eq!(groups[0].events[1].title, "Today 2");
    }
}
