//! Term matching helpers shared by the classifier, scorer and matcher.
//!
//! Terms are lower-case phrases matched on word boundaries. A trailing `*`
//! marks a stem: `hack*` matches "hack", "hacked" and "hackers".

use edge_feed_core::{FeedError, Result};
use regex::Regex;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-cases and collapses whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns true if `term` occurs in `haystack` on word boundaries.
///
/// `haystack` must already be lower-cased (see [`normalize`]).
#[must_use]
pub fn contains_term(haystack: &str, term: &str) -> bool {
    let (needle, stem) = match term.strip_suffix('*') {
        Some(n) => (n, true),
        None => (term, false),
    };
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = stem
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        start = begin + needle.chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Distinct terms from `terms` found in `haystack`, in table order.
#[must_use]
pub fn matched_terms<'a>(haystack: &str, terms: &[&'a str]) -> Vec<&'a str> {
    terms
        .iter()
        .copied()
        .filter(|t| contains_term(haystack, t))
        .collect()
}

#[must_use]
pub fn any_term(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(haystack, t))
}

/// Term without its stem marker, for reasons and descriptions.
#[must_use]
pub fn display_term(term: &str) -> &str {
    term.trim_end_matches('*')
}

/// Finds ticker-shaped tokens in original-case text.
#[derive(Debug, Clone)]
pub struct TickerScanner {
    cashtag: Regex,
    bare: Regex,
}

impl TickerScanner {
    /// # Errors
    /// Returns `FeedError::Configuration` if a pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            cashtag: compile(r"\$([A-Za-z]{1,5})\b")?,
            bare: compile(r"\b([A-Z]{2,5})\b")?,
        })
    }

    /// Distinct `$TICKER` symbols, upper-cased, in order of appearance.
    #[must_use]
    pub fn cashtags(&self, text: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for cap in self.cashtag.captures_iter(text) {
            let symbol = cap[1].to_uppercase();
            if !out.contains(&symbol) {
                out.push(symbol);
            }
        }
        out
    }

    /// Distinct upper-case tokens that look like tickers, including cashtags.
    #[must_use]
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let mut out = self.cashtags(text);
        for cap in self.bare.captures_iter(text) {
            let symbol = cap[1].to_string();
            if !out.contains(&symbol) {
                out.push(symbol);
            }
        }
        out
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| FeedError::Configuration(format!("invalid regex pattern '{pattern}': {e}")))
}
