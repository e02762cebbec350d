//! Classifier output contract shared by every classifier implementation.

use crate::topic::MarketTopic;
use serde::{Deserialize, Serialize};

/// Result of classifying a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_relevant: bool,
    #[serde(default)]
    pub topics: Vec<MarketTopic>,
    /// Relevance score (0-100)
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_signal: Option<String>,
}

impl Classification {
    /// An irrelevant classification with a single reason.
    pub fn irrelevant(reason: impl Into<String>) -> Self {
        Self {
            is_relevant: false,
            topics: Vec::new(),
            score: 0,
            reasons: vec![reason.into()],
            trading_signal: None,
        }
    }

    /// Enforces the output invariants: score within 0-100, no duplicate topics,
    /// and `is_relevant == false` implies zero score, no topics and no signal.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.score = self.score.min(100);

        let mut seen = Vec::with_capacity(self.topics.len());
        self.topics.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });

        if !self.is_relevant {
            self.score = 0;
            self.topics.clear();
            self.trading_signal = None;
        }
        self
    }

    /// First (strongest) topic, if any.
    #[must_use]
    pub fn primary_topic(&self) -> Option<MarketTopic> {
        self.topics.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_zeroes_irrelevant_output() {
        let c = Classification {
            is_relevant: false,
            topics: vec![MarketTopic::Rates],
            score: 55,
            reasons: vec!["noise".to_string()],
            trading_signal: Some("buy".to_string()),
        }
        .normalized();

        assert_eq!(c.score, 0);
        assert!(c.topics.is_empty());
        assert!(c.trading_signal.is_none());
        assert_eq!(c.reasons, vec!["noise".to_string()]);
    }

    #[test]
    fn normalized_dedups_topics_preserving_order() {
        let c = Classification {
            is_relevant: true,
            topics: vec![MarketTopic::Tech, MarketTopic::Rates, MarketTopic::Tech],
            score: 250,
            ..Default::default()
        }
        .normalized();

        assert_eq!(c.topics, vec![MarketTopic::Tech, MarketTopic::Rates]);
        assert_eq!(c.score, 100);
        assert_eq!(c.primary_topic(), Some(MarketTopic::Tech));
    }
}
