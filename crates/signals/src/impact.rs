//! EdgeScore impact scoring.
//!
//! `ImpactScorer::score` is a pure function of its inputs: no clock, no
//! randomness, no interior state. Identical inputs always produce identical
//! breakdowns.

use crate::portfolio::{base_symbol, mentions_ticker};
use crate::taxonomy::{
    CrossAssetPattern, CROSS_ASSET_FLOOR, CROSS_ASSET_PATTERNS, DIRECTIONAL_SENTIMENT_POINTS,
    MILD_SURPRISE_POINTS, MILD_SURPRISE_TERMS, PORTFOLIO_MANY_POINTS, PORTFOLIO_MANY_THRESHOLD,
    PORTFOLIO_NONE_POINTS, PORTFOLIO_SOME_POINTS, PORTFOLIO_UNKNOWN_POINTS, SECTOR_TICKERS,
    SOURCE_QUALITY_BANDS, SOURCE_QUALITY_FLOOR, SOURCE_TIERS, STRONG_SURPRISE_POINTS,
    STRONG_SURPRISE_TERMS, SURPRISE_FLOOR,
};
use crate::text::{any_term, contains_term, display_term, matched_terms, normalize};
use edge_feed_core::score::{
    CROSS_ASSET_MAX, PORTFOLIO_OVERLAP_MAX, SOURCE_WEIGHT_MAX, SURPRISE_FACTOR_MAX,
};
use edge_feed_core::{EdgeScore, NewsItem, ScoreBreakdown, Sentiment, SubScore};
use serde::{Deserialize, Serialize};

/// Everything the score depends on, besides the portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInput {
    pub text: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub source_quality: Option<u8>,
}

impl ScoreInput {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    #[must_use]
    pub fn with_source_quality(mut self, quality: u8) -> Self {
        self.source_quality = Some(quality.min(100));
        self
    }

    #[must_use]
    pub fn from_news(item: &NewsItem) -> Self {
        Self {
            text: item.text(),
            source: item.source.clone(),
            url: item.url.clone(),
            sentiment: item.sentiment,
            source_quality: item.source_quality,
        }
    }
}

/// Computes EdgeScores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactScorer;

impl ImpactScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scores `input` against an optional portfolio ticker list.
    ///
    /// An absent or empty portfolio scores the "unknown" overlap band.
    #[must_use]
    pub fn score(&self, input: &ScoreInput, portfolio: Option<&[String]>) -> EdgeScore {
        let lower = normalize(&input.text);

        let source_weight = source_weight(&input.source, &input.url, input.source_quality);
        let surprise_factor = surprise_factor(&lower, input.sentiment);
        let (cross_asset_effect, affected_assets, historical_note) = cross_asset_effect(&lower);
        let portfolio_overlap = portfolio_overlap(&input.text, &lower, portfolio);

        EdgeScore::from_breakdown(
            ScoreBreakdown {
                source_weight,
                surprise_factor,
                cross_asset_effect,
                portfolio_overlap,
            },
            affected_assets,
            historical_note,
        )
    }

    /// Scores an enriched news item.
    #[must_use]
    pub fn score_item(&self, item: &NewsItem, portfolio: Option<&[String]>) -> EdgeScore {
        self.score(&ScoreInput::from_news(item), portfolio)
    }
}

// ========== Source weight ==========

fn source_weight(source: &str, url: &str, quality: Option<u8>) -> SubScore {
    let source_lower = source.trim().to_lowercase();
    let host = url_host(url).unwrap_or_default();

    for tier in SOURCE_TIERS {
        let hit = tier.patterns.iter().find(|p| {
            source_pattern_matches(&source_lower, p) || source_pattern_matches(&host, p)
        });
        if let Some(pattern) = hit {
            return SubScore::new(
                tier.weight,
                SOURCE_WEIGHT_MAX,
                "Source Weight",
                format!("{} ({pattern})", tier.label),
            );
        }
    }

    let (points, description) = match quality {
        Some(q) => {
            let points = SOURCE_QUALITY_BANDS
                .iter()
                .find(|(min, _)| q >= *min)
                .map_or(SOURCE_QUALITY_FLOOR, |(_, p)| *p);
            (points, format!("Unlisted source, quality {q}"))
        }
        None => (SOURCE_QUALITY_FLOOR, "Unlisted source".to_string()),
    };
    SubScore::new(points, SOURCE_WEIGHT_MAX, "Source Weight", description)
}

fn url_host(url: &str) -> Option<String> {
    url::Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
}

/// Dotted patterns match whole domain labels (`ft.com` does not match
/// `microsoft.com`); plain names match whole words or host labels (`cnn`
/// does not match `bcnnews`).
fn source_pattern_matches(haystack: &str, pattern: &str) -> bool {
    if haystack.is_empty() {
        return false;
    }
    if !pattern.contains('.') {
        return contains_term(haystack, pattern);
    }
    haystack.match_indices(pattern).any(|(i, _)| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + pattern.len()..].chars().next();
        matches!(before, None | Some('.' | '/' | ' ' | '@'))
            && matches!(after, None | Some('.' | '/' | ' ' | ':'))
    })
}

// ========== Surprise factor ==========

fn surprise_factor(lower: &str, sentiment: Sentiment) -> SubScore {
    let strong = matched_terms(lower, STRONG_SURPRISE_TERMS);
    let (points, description) = if let Some(term) = strong.first() {
        (
            STRONG_SURPRISE_POINTS,
            format!("Strong surprise: \"{}\"", display_term(term)),
        )
    } else if let Some(term) = matched_terms(lower, MILD_SURPRISE_TERMS).first() {
        (MILD_SURPRISE_POINTS, format!("Mild surprise: \"{term}\""))
    } else if sentiment.is_directional() {
        (
            DIRECTIONAL_SENTIMENT_POINTS,
            format!("Directional {} tone", sentiment.as_str()),
        )
    } else {
        (SURPRISE_FLOOR, "No surprise signal".to_string())
    };
    SubScore::new(points, SURPRISE_FACTOR_MAX, "Surprise Factor", description)
}

// ========== Cross-asset effect ==========

fn cross_asset_effect(lower: &str) -> (SubScore, Vec<String>, Option<String>) {
    let mut hits: Vec<&CrossAssetPattern> = CROSS_ASSET_PATTERNS
        .iter()
        .filter(|p| any_term(lower, p.terms))
        .collect();
    // Stable: equal weights keep table order
    hits.sort_by(|a, b| b.weight.cmp(&a.weight));

    let Some(top) = hits.first() else {
        return (
            SubScore::new(
                CROSS_ASSET_FLOOR,
                CROSS_ASSET_MAX,
                "Cross-Asset Effect",
                "No macro pattern",
            ),
            Vec::new(),
            None,
        );
    };

    let mut assets: Vec<String> = Vec::new();
    for pattern in &hits {
        for asset in pattern.assets {
            if !assets.iter().any(|a| a == asset) {
                assets.push((*asset).to_string());
            }
        }
    }
    let names: Vec<&str> = hits.iter().map(|p| p.name).collect();

    (
        SubScore::new(
            top.weight,
            CROSS_ASSET_MAX,
            "Cross-Asset Effect",
            format!("Macro patterns: {}", names.join(", ")),
        ),
        assets,
        Some(top.note.to_string()),
    )
}

// ========== Portfolio overlap ==========

fn portfolio_overlap(text: &str, lower: &str, portfolio: Option<&[String]>) -> SubScore {
    let Some(tickers) = portfolio.filter(|p| !p.is_empty()) else {
        return SubScore::new(
            PORTFOLIO_UNKNOWN_POINTS,
            PORTFOLIO_OVERLAP_MAX,
            "Portfolio Overlap",
            "No portfolio supplied",
        );
    };

    let expanded: Vec<&str> = SECTOR_TICKERS
        .iter()
        .filter(|s| any_term(lower, s.terms))
        .flat_map(|s| s.tickers.iter().copied())
        .collect();

    let mut overlapping: Vec<&str> = Vec::new();
    for ticker in tickers {
        let base = base_symbol(ticker);
        let hit = mentions_ticker(text, ticker)
            || mentions_ticker(text, &base)
            || expanded.iter().any(|e| *e == base);
        if hit && !overlapping.contains(&ticker.as_str()) {
            overlapping.push(ticker.as_str());
        }
    }

    let points = match overlapping.len() {
        n if n >= PORTFOLIO_MANY_THRESHOLD => PORTFOLIO_MANY_POINTS,
        0 => PORTFOLIO_NONE_POINTS,
        _ => PORTFOLIO_SOME_POINTS,
    };
    let description = if overlapping.is_empty() {
        "No holdings mentioned".to_string()
    } else {
        format!("Holdings: {}", overlapping.join(", "))
    };
    SubScore::new(points, PORTFOLIO_OVERLAP_MAX, "Portfolio Overlap", description)
}
