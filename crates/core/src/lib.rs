//! Core types, traits and configuration for the edge-feed pipeline.
//!
//! This crate provides:
//! - Domain models for news, calendar events, topics and scores
//! - Collaborator traits for classifiers, providers and the cache store
//! - `FeedError`, the typed error shared by every stage
//! - Layered configuration loading

pub mod cache;
pub mod calendar;
pub mod classification;
pub mod config;
pub mod config_loader;
pub mod error;
pub mod news;
pub mod portfolio;
pub mod query;
pub mod score;
pub mod session;
pub mod topic;
pub mod traits;

pub use cache::{CacheEntry, CacheKey};
pub use calendar::{CalendarEvent, EventType, Importance, RawCalendarRecord};
pub use classification::Classification;
pub use config::{
    AppConfig, CacheConfig, ClassifierConfig, LlmConfig, ProvidersConfig, ServerConfig,
    SessionConfig,
};
pub use config_loader::ConfigLoader;
pub use error::{FeedError, Result};
pub use news::{NewsItem, RawNewsItem, Sentiment};
pub use portfolio::{AssetType, PortfolioAsset};
pub use query::{CalendarQuery, NewsQuery};
pub use score::{EdgeScore, ImpactLevel, ScoreBreakdown, SubScore};
pub use session::SessionBucket;
pub use topic::MarketTopic;
pub use traits::{CacheStore, CalendarProvider, Classifier, NewsProvider};
