//! Deterministic keyword classifier.
//!
//! Always available and infallible; it is the guaranteed fallback behind any
//! LLM classifier.

use crate::taxonomy::{
    CASHTAG_WEIGHT, LARGE_CAPS, LARGE_CAP_WEIGHT, MARKET_CONTEXT_TERMS, MARKET_VOCAB,
    MARKET_VOCAB_WEIGHT, NOISE_TERMS, RELEVANCE_THRESHOLD, TOPIC_HIT_WEIGHT, TOPIC_RULES,
};
use crate::text::{any_term, display_term, matched_terms, normalize, TickerScanner};
use async_trait::async_trait;
use edge_feed_core::{Classification, Classifier, MarketTopic, Result};

/// Keyword-table classifier.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    scanner: TickerScanner,
}

impl RuleClassifier {
    /// # Errors
    /// Returns `FeedError::Configuration` if the ticker patterns fail to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: TickerScanner::new()?,
        })
    }

    /// Classifies `text` synchronously.
    #[must_use]
    pub fn evaluate(&self, text: &str) -> Classification {
        let haystack = normalize(text);

        if any_term(&haystack, NOISE_TERMS) && !any_term(&haystack, MARKET_CONTEXT_TERMS) {
            tracing::debug!("Rejected as noise: {}", truncate(text, 60));
            return Classification::irrelevant("noise pattern without market context");
        }

        let mut score: u32 = 0;
        let mut reasons = Vec::new();

        let mut topic_hits: Vec<(MarketTopic, usize)> = Vec::new();
        for rule in TOPIC_RULES {
            let hits = matched_terms(&haystack, rule.terms);
            if hits.is_empty() {
                continue;
            }
            score += TOPIC_HIT_WEIGHT * hits.len() as u32;
            reasons.push(format!("{}: {}", rule.topic.label(), describe(&hits)));
            topic_hits.push((rule.topic, hits.len()));
        }
        // Stable sort keeps taxonomy order among equal counts
        topic_hits.sort_by(|a, b| b.1.cmp(&a.1));
        let topics: Vec<MarketTopic> = topic_hits.into_iter().map(|(t, _)| t).collect();

        let vocab = matched_terms(&haystack, MARKET_VOCAB);
        if !vocab.is_empty() {
            score += MARKET_VOCAB_WEIGHT * vocab.len() as u32;
            reasons.push(format!("Market vocabulary: {}", describe(&vocab)));
        }

        let cashtags = self.scanner.cashtags(text);
        if !cashtags.is_empty() {
            score += CASHTAG_WEIGHT * cashtags.len() as u32;
            let tags: Vec<String> = cashtags.iter().map(|t| format!("${t}")).collect();
            reasons.push(format!("Tickers: {}", tags.join(", ")));
        }

        let large_caps = matched_terms(&haystack, LARGE_CAPS);
        if !large_caps.is_empty() {
            score += LARGE_CAP_WEIGHT * large_caps.len() as u32;
            reasons.push(format!("Large caps: {}", describe(&large_caps)));
        }

        let bonus_hit = !vocab.is_empty() || !cashtags.is_empty() || !large_caps.is_empty();
        let is_relevant = score >= RELEVANCE_THRESHOLD || !topics.is_empty() || bonus_hit;
        if !is_relevant {
            reasons.push("no market keywords".to_string());
        }

        Classification {
            is_relevant,
            topics,
            score: score.min(100) as u8,
            reasons,
            trading_signal: None,
        }
        .normalized()
    }
}

#[async_trait]
impl Classifier for RuleClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        Ok(self.evaluate(text))
    }

    fn name(&self) -> &str {
        "rules"
    }
}

fn describe(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|t| display_term(t))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RuleClassifier {
        RuleClassifier::new().unwrap()
    }

    // ========== Noise Tests ==========

    #[test]
    fn celebrity_noise_is_rejected() {
        let c = classifier().evaluate("Kardashian wedding dazzles on the red carpet");
        assert!(!c.is_relevant);
        assert_eq!(c.score, 0);
        assert!(c.topics.is_empty());
    }

    #[test]
    fn noise_with_market_context_is_kept() {
        let c = classifier().evaluate("Taylor Swift tour lifts hotel stocks");
        assert!(c.is_relevant);
        assert!(c.score > 0);
    }

    // ========== Topic Tests ==========

    #[test]
    fn fed_headline_maps_to_rates() {
        let c = classifier().evaluate("Fed signals unexpected rate hike");
        assert!(c.is_relevant);
        assert_eq!(c.primary_topic(), Some(MarketTopic::Rates));
        // "fed" and "rate hike"
        assert_eq!(c.score, 20);
        assert!(c.reasons[0].starts_with("Rates"));
    }

    #[test]
    fn topics_ordered_by_hit_count() {
        let c = classifier()
            .evaluate("Exchange hacked in exploit after data breach; SEC opens probe");
        assert_eq!(c.topics, vec![MarketTopic::Security, MarketTopic::Regulation]);
    }

    #[test]
    fn stems_match_inflections() {
        let c = classifier().evaluate("Chipmaker agrees takeover by rival");
        assert!(c.topics.contains(&MarketTopic::Tech));
        assert!(c.topics.contains(&MarketTopic::Mergers));
    }

    // ========== Bonus Tests ==========

    #[test]
    fn cashtags_and_large_caps_score() {
        let c = classifier().evaluate("$NVDA and $AMD move as Nvidia updates outlook");
        // two cashtags (20) + nvidia large cap (20)
        assert_eq!(c.score, 40);
        assert!(c.is_relevant);
        assert!(c.reasons.iter().any(|r| r == "Tickers: $NVDA, $AMD"));
    }

    #[test]
    fn market_vocab_alone_is_relevant() {
        let c = classifier().evaluate("Markets were quiet");
        assert!(c.is_relevant);
        assert!(c.topics.is_empty());
        assert_eq!(c.score, 15);
    }

    #[test]
    fn score_is_clamped() {
        let c = classifier().evaluate(
            "Apple Microsoft Nvidia Amazon Tesla stocks markets trading shares \
             equities Fed inflation CPI earnings merger",
        );
        assert_eq!(c.score, 100);
    }

    #[test]
    fn plain_text_is_irrelevant() {
        let c = classifier().evaluate("A quiet afternoon in the park");
        assert!(!c.is_relevant);
        assert_eq!(c.score, 0);
        assert_eq!(c.reasons, vec!["no market keywords".to_string()]);
    }

    #[test]
    fn irrelevant_output_is_always_empty() {
        let texts = [
            "Grammy winners announced",
            "Recipe: lemon cake",
            "Weekend weather looks sunny",
            "Oscars red carpet looks",
        ];
        let classifier = classifier();
        for text in texts {
            let c = classifier.evaluate(text);
            if !c.is_relevant {
                assert_eq!(c.score, 0, "{text}");
                assert!(c.topics.is_empty(), "{text}");
            }
        }
    }

    #[tokio::test]
    async fn trait_classify_matches_evaluate() {
        let classifier = classifier();
        let text = "Bitcoin ETF inflows hit record";
        assert_eq!(classifier.classify(text).await.unwrap(), classifier.evaluate(text));
        assert_eq!(classifier.name(), "rules");
    }
}
