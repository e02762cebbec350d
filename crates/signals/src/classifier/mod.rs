//! Topic classifiers.
//!
//! All implementations share the [`edge_feed_core::Classifier`] contract:
//! - `RuleClassifier`: deterministic keyword tables
//! - `LlmClassifier`: chat-completions model, rate limited
//! - `FallbackClassifier`: primary under a timeout, rules on any failure

pub mod cache;
pub mod fallback;
pub mod llm;
pub mod rules;

pub use cache::ClassificationCache;
pub use fallback::{FallbackClassifier, DEFAULT_PRIMARY_TIMEOUT};
pub use llm::{parse_reply, LlmClassifier};
pub use rules::RuleClassifier;
