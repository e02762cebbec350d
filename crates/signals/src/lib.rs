pub mod classifier;
pub mod impact;
pub mod portfolio;
pub mod sentiment;
pub mod session;
pub mod taxonomy;
pub mod text;

// Re-export classifiers for convenience
pub use classifier::{
    parse_reply, ClassificationCache, FallbackClassifier, LlmClassifier, RuleClassifier,
    DEFAULT_PRIMARY_TIMEOUT,
};

// Re-export scoring
pub use impact::{ImpactScorer, ScoreInput};

// Re-export matching and session helpers
pub use portfolio::{base_symbol, mentions_ticker, PortfolioMatcher};
pub use sentiment::{infer_sentiment, resolve_sentiment};
pub use session::{
    date_key, display_label, local_date, minutes_of_day, parse_date_key, parse_timezone,
    resolve_session, session_time_label, MarketClock, UNKNOWN_TIME,
};
pub use text::TickerScanner;
