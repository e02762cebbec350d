//! Dedup keys.
//!
//! Two items are the same story when their canonical URLs match, or, when no
//! usable URL exists, when their normalized titles match.

use edge_feed_core::{CalendarEvent, NewsItem};
use std::collections::HashSet;
use url::Url;

/// Canonical form of a URL, or `None` for placeholders.
///
/// Scheme and `www.` are dropped, the host is lower-cased, the fragment and
/// `utm_*` parameters are removed, and a trailing slash is trimmed.
#[must_use]
pub fn canonical_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "#" {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() || host == "localhost" || host == "example.com" {
        return None;
    }

    let query: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| !k.to_lowercase().starts_with("utm_"))
        .map(|(k, v)| if v.is_empty() { k.into_owned() } else { format!("{k}={v}") })
        .collect();

    let path = url.path().trim_end_matches('/');
    let mut canonical = format!("{host}{path}");
    if !query.is_empty() {
        canonical.push('?');
        canonical.push_str(&query.join("&"));
    }
    Some(canonical)
}

/// Lower-cases, strips punctuation and collapses whitespace.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn news_key(item: &NewsItem) -> String {
    canonical_url(&item.url).unwrap_or_else(|| format!("title:{}", normalize_title(&item.title)))
}

#[must_use]
pub fn calendar_key(event: &CalendarEvent) -> String {
    format!("{}|{}", normalize_title(&event.title), event.date_key)
}

/// Keeps the first item for each key, preserving order.
pub fn dedup_by_key<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
