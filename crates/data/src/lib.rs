//! Providers, normalization, aggregation and caching for the edge-feed pipeline.
//!
//! This crate provides:
//! - HTTP news and calendar providers plus a static fallback calendar
//! - Normalization of raw provider records into served models
//! - Multi-source merge, dedup, filtering, ordering and day grouping
//! - An in-memory TTL cache with a background sweep
//! - `FeedService`, which wires the pipeline together

pub mod aggregate;
pub mod cache;
pub mod normalize;
pub mod providers;
pub mod service;

pub use aggregate::{merge_sources, DayGroup, Merged, SourceOutcome};
pub use cache::{spawn_cleanup, MemoryCache};
pub use normalize::{normalize_calendar, normalize_news, stable_id};
pub use providers::{
    FairEconomyCalendarProvider, FinnhubNewsProvider, FmpCalendarProvider, HttpSettings,
    StaticCalendar, StaticNews,
};
pub use service::{CalendarFeed, FeedMeta, FeedService, NewsFeed, ServiceSettings};
