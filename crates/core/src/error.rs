//! Error types for the feed pipeline.
//!
//! Every variant is recoverable at the stage that produces it; nothing here is
//! meant to reach the presentation layer.

use thiserror::Error;

/// Errors raised at collaborator seams (providers, LLM, cache).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// A provider failed or could not be reached.
    #[error("upstream unavailable: {source_name} - {reason}")]
    UpstreamUnavailable {
        /// Provider name.
        source_name: String,
        /// Failure detail.
        reason: String,
    },

    /// A provider or the LLM did not answer in time.
    #[error("request to {source_name} timed out after {after_ms}ms")]
    Timeout {
        /// Provider name.
        source_name: String,
        /// Timeout that elapsed.
        after_ms: u64,
    },

    /// A provider returned JSON that does not match the expected shape.
    #[error("malformed payload from {source_name}: {reason}")]
    MalformedPayload {
        /// Provider name.
        source_name: String,
        /// Parse detail.
        reason: String,
    },

    /// The LLM classifier errored or returned unusable output.
    #[error("classification failure: {0}")]
    ClassificationFailure(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Cache store failure.
    #[error("cache error: {0}")]
    Cache(String),
}

impl FeedError {
    /// Creates an upstream-unavailable error.
    pub fn upstream(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(source_name: impl Into<String>, after_ms: u64) -> Self {
        Self::Timeout {
            source_name: source_name.into(),
            after_ms,
        }
    }

    /// Creates a malformed-payload error.
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for failures that mean "skip this provider and continue".
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::Timeout { .. } | Self::MalformedPayload { .. }
        )
    }

    /// Provider name for source-scoped errors.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::UpstreamUnavailable { source_name, .. }
            | Self::Timeout { source_name, .. }
            | Self::MalformedPayload { source_name, .. } => Some(source_name),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
