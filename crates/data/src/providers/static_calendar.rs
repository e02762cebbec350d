//! Built-in calendar of recurring US releases.
//!
//! Served only when every live provider fails, so the calendar view never
//! goes blank. Times are exchange-local and converted to UTC instants.

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use edge_feed_core::{CalendarProvider, CalendarQuery, RawCalendarRecord, Result};

/// Longest window the static set will expand.
const MAX_DAYS: i64 = 31;

#[derive(Debug, Clone, Copy)]
struct Release {
    title: &'static str,
    weekday: Weekday,
    hour: u32,
    minute: u32,
    impact: &'static str,
}

const WEEKLY_RELEASES: &[Release] = &[
    Release { title: "ISM Manufacturing PMI", weekday: Weekday::Mon, hour: 10, minute: 0, impact: "High" },
    Release { title: "JOLTS Job Openings", weekday: Weekday::Tue, hour: 10, minute: 0, impact: "Medium" },
    Release { title: "CB Consumer Confidence", weekday: Weekday::Tue, hour: 10, minute: 0, impact: "Medium" },
    Release { title: "ADP Non-Farm Employment Change", weekday: Weekday::Wed, hour: 8, minute: 15, impact: "Medium" },
    Release { title: "Crude Oil Inventories", weekday: Weekday::Wed, hour: 10, minute: 30, impact: "Low" },
    Release { title: "Unemployment Claims", weekday: Weekday::Thu, hour: 8, minute: 30, impact: "Medium" },
    Release { title: "Fed Chair Speaks", weekday: Weekday::Thu, hour: 14, minute: 0, impact: "High" },
    Release { title: "UoM Consumer Sentiment", weekday: Weekday::Fri, hour: 10, minute: 0, impact: "Medium" },
];

/// Static fallback calendar.
#[derive(Debug, Clone, Copy)]
pub struct StaticCalendar {
    tz: Tz,
}

impl Default for StaticCalendar {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York)
    }
}

impl StaticCalendar {
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Records for every weekday release inside the query window.
    #[must_use]
    pub fn records_for(&self, query: &CalendarQuery) -> Vec<RawCalendarRecord> {
        let days = (query.to - query.from).num_days().clamp(0, MAX_DAYS - 1);
        let mut records = Vec::new();
        for offset in 0..=days {
            let day = query.from + Duration::days(offset);
            for release in WEEKLY_RELEASES.iter().filter(|r| r.weekday == day.weekday()) {
                records.push(
                    RawCalendarRecord::new(release.title, self.instant(day, release))
                        .with_impact(release.impact)
                        .with_currency("USD")
                        .with_country("US"),
                );
            }
        }
        records
    }

    fn instant(&self, day: NaiveDate, release: &Release) -> String {
        day.and_hms_opt(release.hour, release.minute, 0)
            .and_then(|naive| self.tz.from_local_datetime(&naive).single())
            .map(|local| local.with_timezone(&Utc).to_rfc3339())
            .unwrap_or_else(|| day.format("%Y-%m-%d").to_string())
    }
}

#[async_trait]
impl CalendarProvider for StaticCalendar {
    async fn fetch_calendar(&self, query: &CalendarQuery) -> Result<Vec<RawCalendarRecord>> {
        Ok(self.records_for(query))
    }

    fn name(&self) -> &str {
        "static"
    }
}
