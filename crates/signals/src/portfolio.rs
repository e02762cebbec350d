//! Portfolio relevance matching.
//!
//! A symbol only matches on word boundaries or with a `$` prefix, so "SOL"
//! never matches inside "solution".

use crate::taxonomy::COMPANY_ALIASES;
use crate::text::{any_term, contains_term, normalize, TickerScanner};
use edge_feed_core::{PortfolioAsset, Result};

const QUOTE_SUFFIXES: &[&str] = &["USDT", "USDC", "BUSD", "USD"];

/// Reduces exchange-specific spellings to a base symbol.
///
/// `BTC-USD`, `BTC/USDT` and `BTCUSDT` become `BTC`; `BRK.B` becomes `BRK`.
#[must_use]
pub fn base_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    let head = upper
        .split(['-', '/', '.'])
        .next()
        .unwrap_or(upper.as_str())
        .to_string();
    for suffix in QUOTE_SUFFIXES {
        if let Some(base) = head.strip_suffix(suffix) {
            if base.len() >= 2 {
                return base.to_string();
            }
        }
    }
    head
}

/// Returns true if `text` names `symbol` as a bare upper-case word or as a
/// case-insensitive `$SYMBOL` cashtag.
#[must_use]
pub fn mentions_ticker(text: &str, symbol: &str) -> bool {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return false;
    }
    let upper = symbol.to_uppercase();
    if contains_term(text, &upper) {
        return true;
    }
    contains_term(&text.to_lowercase(), &format!("${}", upper.to_lowercase()))
}

/// Matches text against a set of portfolio holdings.
#[derive(Debug, Clone)]
pub struct PortfolioMatcher {
    scanner: TickerScanner,
}

impl PortfolioMatcher {
    /// # Errors
    /// Returns `FeedError::Configuration` if the ticker patterns fail to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: TickerScanner::new()?,
        })
    }

    /// Returns true if `text` mentions any asset.
    #[must_use]
    pub fn matches(&self, text: &str, assets: &[PortfolioAsset]) -> bool {
        if assets.is_empty() {
            return false;
        }
        let ctx = MatchContext::new(&self.scanner, text);
        assets.iter().any(|a| ctx.matches(&a.symbol))
    }

    /// Portfolio symbols mentioned by `text`, in portfolio order.
    #[must_use]
    pub fn matched_symbols(&self, text: &str, assets: &[PortfolioAsset]) -> Vec<String> {
        if assets.is_empty() {
            return Vec::new();
        }
        let ctx = MatchContext::new(&self.scanner, text);
        let mut out: Vec<String> = Vec::new();
        for asset in assets {
            if ctx.matches(&asset.symbol) && !out.contains(&asset.symbol) {
                out.push(asset.symbol.clone());
            }
        }
        out
    }

    /// Ticker-shaped tokens found in `text`.
    #[must_use]
    pub fn ticker_tokens(&self, text: &str) -> Vec<String> {
        self.scanner.tokens(text)
    }
}

/// Per-text state shared across the assets being checked.
struct MatchContext<'a> {
    text: &'a str,
    lower: String,
    tokens: Vec<String>,
}

impl<'a> MatchContext<'a> {
    fn new(scanner: &TickerScanner, text: &'a str) -> Self {
        Self {
            text,
            lower: normalize(text),
            tokens: scanner.tokens(text),
        }
    }

    fn matches(&self, symbol: &str) -> bool {
        let base = base_symbol(symbol);
        if base.is_empty() {
            return false;
        }

        if mentions_ticker(self.text, symbol) || mentions_ticker(self.text, &base) {
            return true;
        }

        let alias_hit = COMPANY_ALIASES
            .iter()
            .filter(|a| a.ticker == base)
            .any(|a| any_term(&self.lower, a.names));
        if alias_hit {
            return true;
        }

        self.tokens.iter().any(|t| base_symbol(t) == base)
    }
}
