//! Session and time-window resolution.
//!
//! Converts instants into exchange-local session buckets and calendar dates.
//! Calendar dates are `NaiveDate` values built from local components; a
//! `YYYY-MM-DD` string is never interpreted as a UTC instant, so a date can't
//! shift by a day when the host and the exchange sit in different timezones.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use edge_feed_core::{FeedError, SessionBucket};

/// Pre-market opens at 04:00 exchange time.
pub const PRE_MARKET_OPEN: u32 = 4 * 60;
/// Regular session opens at 09:30.
pub const REGULAR_OPEN: u32 = 9 * 60 + 30;
/// Regular session closes at 16:00.
pub const REGULAR_CLOSE: u32 = 16 * 60;
/// After-hours trading ends at 20:00.
pub const AFTER_HOURS_CLOSE: u32 = 20 * 60;

/// Display time for events that carry a date but no time.
pub const UNKNOWN_TIME: &str = "TBD";

/// Parses an IANA timezone name.
///
/// # Errors
/// Returns `FeedError::Configuration` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz, FeedError> {
    name.parse::<Tz>()
        .map_err(|e| FeedError::Configuration(format!("invalid exchange timezone '{name}': {e}")))
}

/// Resolves the session bucket of `timestamp` on the exchange in `tz`.
#[must_use]
pub fn resolve_session(timestamp: DateTime<Utc>, tz: Tz) -> SessionBucket {
    let local = timestamp.with_timezone(&tz);
    bucket_for(local.weekday(), local.hour() * 60 + local.minute())
}

fn bucket_for(weekday: Weekday, minute_of_day: u32) -> SessionBucket {
    if matches!(weekday, Weekday::Sat | Weekday::Sun) {
        return SessionBucket::MarketClosed;
    }
    match minute_of_day {
        m if (PRE_MARKET_OPEN..REGULAR_OPEN).contains(&m) => SessionBucket::PreMarket,
        m if (REGULAR_OPEN..REGULAR_CLOSE).contains(&m) => SessionBucket::RegularHours,
        m if (REGULAR_CLOSE..AFTER_HOURS_CLOSE).contains(&m) => SessionBucket::AfterHours,
        _ => SessionBucket::MarketClosed,
    }
}

/// "Today", "Tomorrow", or a short date like "Nov 26".
///
/// Compares calendar dates, never elapsed time.
#[must_use]
pub fn display_label(date: NaiveDate, today: NaiveDate, tomorrow: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == tomorrow {
        "Tomorrow".to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Parses `YYYY-MM-DD` into a local calendar date.
#[must_use]
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    let date_part = key.get(..10).unwrap_or(key);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Exchange-local calendar date of an instant.
#[must_use]
pub fn local_date(timestamp: DateTime<Utc>, tz: Tz) -> NaiveDate {
    timestamp.with_timezone(&tz).date_naive()
}

/// Exchange-local `HH:MM` of an instant.
#[must_use]
pub fn session_time_label(timestamp: DateTime<Utc>, tz: Tz) -> String {
    timestamp.with_timezone(&tz).format("%H:%M").to_string()
}

/// Minute of day for an `HH:MM` label; `None` for `TBD` or garbage.
#[must_use]
pub fn minutes_of_day(label: &str) -> Option<u32> {
    let (h, m) = label.trim().split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.get(..2).unwrap_or(m).parse().ok()?;
    (hour < 24 && minute < 60).then_some(hour * 60 + minute)
}

/// Exchange clock bound to one timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketClock {
    tz: Tz,
}

impl Default for MarketClock {
    fn default() -> Self {
        Self {
            tz: chrono_tz::America::New_York,
        }
    }
}

impl MarketClock {
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a clock from an IANA timezone name.
    ///
    /// # Errors
    /// Returns `FeedError::Configuration` for unknown names.
    pub fn from_name(name: &str) -> Result<Self, FeedError> {
        parse_timezone(name).map(Self::new)
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn session(&self, timestamp: DateTime<Utc>) -> SessionBucket {
        resolve_session(timestamp, self.tz)
    }

    #[must_use]
    pub fn local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        local_date(timestamp, self.tz)
    }

    #[must_use]
    pub fn time_label(&self, timestamp: DateTime<Utc>) -> String {
        session_time_label(timestamp, self.tz)
    }

    /// Exchange-local today.
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local_date(now)
    }

    /// Exchange-local tomorrow.
    #[must_use]
    pub fn tomorrow(&self, now: DateTime<Utc>) -> NaiveDate {
        let today = self.today(now);
        today.succ_opt().unwrap_or(today + Duration::days(1))
    }

    /// Display label of `date` relative to `now`.
    #[must_use]
    pub fn label_for(&self, date: NaiveDate, now: DateTime<Utc>) -> String {
        display_label(date, self.today(now), self.tomorrow(now))
    }

    /// Exchange-local hour of `now`.
    #[must_use]
    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.tz).hour()
    }

    /// True once exchange-local time has reached `cutoff_hour`.
    #[must_use]
    pub fn is_past_cutoff(&self, now: DateTime<Utc>, cutoff_hour: u32) -> bool {
        self.local_hour(now) >= cutoff_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Tokyo;

    fn ny(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== resolve_session Tests ==========

    #[test]
    fn opening_bell_is_regular_hours() {
        assert_eq!(resolve_session(ny(2024, 11, 26, 9, 30), New_York), SessionBucket::RegularHours);
    }

    #[test]
    fn minute_before_open_is_pre_market() {
        assert_eq!(resolve_session(ny(2024, 11, 26, 9, 29), New_York), SessionBucket::PreMarket);
    }

    #[test]
    fn closing_bell_is_after_hours() {
        assert_eq!(resolve_session(ny(2024, 11, 26, 16, 0), New_York), SessionBucket::AfterHours);
    }

    #[test]
    fn saturday_noon_is_closed() {
        assert_eq!(resolve_session(ny(2024, 11, 30, 12, 0), New_York), SessionBucket::MarketClosed);
    }

    #[test]
    fn overnight_edges() {
        assert_eq!(resolve_session(ny(2024, 11, 26, 3, 59), New_York), SessionBucket::MarketClosed);
        assert_eq!(resolve_session(ny(2024, 11, 26, 4, 0), New_York), SessionBucket::PreMarket);
        assert_eq!(resolve_session(ny(2024, 11, 26, 19, 59), New_York), SessionBucket::AfterHours);
        assert_eq!(resolve_session(ny(2024, 11, 26, 20, 0), New_York), SessionBucket::MarketClosed);
    }

    #[test]
    fn daylight_saving_is_respected() {
        // 13:30 UTC is 09:30 EDT in July but 08:30 EST in November.
        let july = Utc.with_ymd_and_hms(2024, 7, 9, 13, 30, 0).unwrap();
        let november = Utc.with_ymd_and_hms(2024, 11, 26, 13, 30, 0).unwrap();
        assert_eq!(resolve_session(july, New_York), SessionBucket::RegularHours);
        assert_eq!(resolve_session(november, New_York), SessionBucket::PreMarket);
    }

    #[test]
    fn weekday_is_taken_in_exchange_time() {
        // Saturday 00:00 UTC is Friday 19:00 in New York.
        let friday_evening = Utc.with_ymd_and_hms(2024, 11, 30, 0, 0, 0).unwrap();
        assert_eq!(resolve_session(friday_evening, New_York), SessionBucket::AfterHours);
        // Monday 08:00 in Tokyo is Sunday 23:00 UTC.
        let tokyo_monday = Tokyo
            .with_ymd_and_hms(2024, 12, 2, 8, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(resolve_session(tokyo_monday, Tokyo), SessionBucket::PreMarket);
    }

    // ========== Date handling Tests ==========

    #[test]
    fn display_labels() {
        let today = date(2024, 11, 26);
        let tomorrow = date(2024, 11, 27);
        assert_eq!(display_label(today, today, tomorrow), "Today");
        assert_eq!(display_label(tomorrow, today, tomorrow), "Tomorrow");
        assert_eq!(display_label(date(2024, 11, 29), today, tomorrow), "Nov 29");
        assert_eq!(display_label(date(2024, 12, 5), today, tomorrow), "Dec 5");
    }

    #[test]
    fn date_key_parses_local_components() {
        let parsed = parse_date_key("2024-11-26").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 11, 26));
        assert_eq!(date_key(parsed), "2024-11-26");
        assert_eq!(parse_date_key("2024-11-26T13:30:00Z"), Some(date(2024, 11, 26)));
        assert_eq!(parse_date_key("11/26/2024"), None);
    }

    #[test]
    fn local_date_uses_exchange_timezone() {
        // 02:00 UTC on the 27th is still the 26th in New York.
        let late = Utc.with_ymd_and_hms(2024, 11, 27, 2, 0, 0).unwrap();
        assert_eq!(local_date(late, New_York), date(2024, 11, 26));
        assert_eq!(local_date(late, Tokyo), date(2024, 11, 27));
    }

    #[test]
    fn labels_near_midnight_follow_calendar_dates() {
        let clock = MarketClock::new(New_York);
        let just_before_midnight = ny(2024, 11, 26, 23, 59);
        assert_eq!(clock.label_for(date(2024, 11, 26), just_before_midnight), "Today");
        assert_eq!(clock.label_for(date(2024, 11, 27), just_before_midnight), "Tomorrow");

        let just_after_midnight = ny(2024, 11, 27, 0, 1);
        assert_eq!(clock.label_for(date(2024, 11, 26), just_after_midnight), "Nov 26");
        assert_eq!(clock.label_for(date(2024, 11, 27), just_after_midnight), "Today");
    }

    #[test]
    fn minutes_of_day_parsing() {
        assert_eq!(minutes_of_day("08:30"), Some(510));
        assert_eq!(minutes_of_day("23:59"), Some(1439));
        assert_eq!(minutes_of_day(UNKNOWN_TIME), None);
        assert_eq!(minutes_of_day("25:00"), None);
    }

    #[test]
    fn clock_time_label_and_cutoff() {
        let clock = MarketClock::from_name("America/New_York").unwrap();
        let morning = ny(2024, 11, 26, 8, 30);
        assert_eq!(clock.time_label(morning), "08:30");
        assert!(!clock.is_past_cutoff(morning, 12));
        assert!(clock.is_past_cutoff(ny(2024, 11, 26, 12, 0), 12));
    }

    #[test]
    fn unknown_timezone_is_configuration_error() {
        assert!(matches!(
            MarketClock::from_name("Mars/Olympus"),
            Err(FeedError::Configuration(_))
        ));
    }
}
