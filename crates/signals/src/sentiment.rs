//! Keyword sentiment for items whose provider supplies none.

use crate::taxonomy::{BEARISH_TERMS, BULLISH_TERMS};
use crate::text::{matched_terms, normalize};
use edge_feed_core::Sentiment;

/// Infers sentiment by counting bullish and bearish keyword hits.
///
/// Ties, including no hits at all, are neutral.
#[must_use]
pub fn infer_sentiment(text: &str) -> Sentiment {
    let haystack = normalize(text);
    let bullish = matched_terms(&haystack, BULLISH_TERMS).len();
    let bearish = matched_terms(&haystack, BEARISH_TERMS).len();

    match bullish.cmp(&bearish) {
        std::cmp::Ordering::Greater => Sentiment::Bullish,
        std::cmp::Ordering::Less => Sentiment::Bearish,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Provider sentiment when present, otherwise inferred from `text`.
#[must_use]
pub fn resolve_sentiment(provided: Option<Sentiment>, text: &str) -> Sentiment {
    provided.unwrap_or_else(|| infer_sentiment(text))
}
