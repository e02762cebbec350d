//! News ordering.

use edge_feed_core::NewsItem;
use edge_feed_signals::taxonomy::{CENTRAL_BANK_TERMS, US_TERMS};
use edge_feed_signals::text::{any_term, normalize};
use std::cmp::Reverse;

/// Returns true if the item reads as US-focused.
#[must_use]
pub fn is_us_story(item: &NewsItem) -> bool {
    any_term(&normalize(&item.text()), US_TERMS)
}

/// Returns true if the item mentions the Fed or a named central bank.
#[must_use]
pub fn mentions_central_bank(item: &NewsItem) -> bool {
    any_term(&normalize(&item.text()), CENTRAL_BANK_TERMS)
}

/// US first, central banks first, impact descending, newest first, then id.
pub fn sort_news(items: &mut [NewsItem]) {
    items.sort_by_cached_key(|item| {
        let text = normalize(&item.text());
        (
            !any_term(&text, US_TERMS),
            !any_term(&text, CENTRAL_BANK_TERMS),
            Reverse(item.impact()),
            Reverse(item.timestamp),
            item.id.clone(),
        )
    });
}
