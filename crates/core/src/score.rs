//! EdgeScore model.
//!
//! The composite impact score is the plain sum of four bounded sub-scores.
//! Maxima are fixed and sum to 100, so every score is fully explained by its
//! breakdown.

use serde::{Deserialize, Serialize};

/// Maximum source-authority points.
pub const SOURCE_WEIGHT_MAX: u8 = 30;
/// Maximum surprise points.
pub const SURPRISE_FACTOR_MAX: u8 = 25;
/// Maximum cross-asset points.
pub const CROSS_ASSET_MAX: u8 = 25;
/// Maximum portfolio-overlap points.
pub const PORTFOLIO_OVERLAP_MAX: u8 = 20;

/// One component of the EdgeScore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScore {
    pub score: u8,
    pub max_score: u8,
    pub label: String,
    pub description: String,
}

impl SubScore {
    /// Creates a sub-score, clamping `score` to `max_score`.
    pub fn new(
        score: u8,
        max_score: u8,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            score: score.min(max_score),
            max_score,
            label: label.into(),
            description: description.into(),
        }
    }
}

/// The four named sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub source_weight: SubScore,
    pub surprise_factor: SubScore,
    pub cross_asset_effect: SubScore,
    pub portfolio_overlap: SubScore,
}

impl ScoreBreakdown {
    /// Sum of the four sub-scores.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.parts().iter().map(|p| p.score).sum()
    }

    /// Sum of the four maxima (always 100).
    #[must_use]
    pub fn max_total(&self) -> u8 {
        self.parts().iter().map(|p| p.max_score).sum()
    }

    fn parts(&self) -> [&SubScore; 4] {
        [
            &self.source_weight,
            &self.surprise_factor,
            &self.cross_asset_effect,
            &self.portfolio_overlap,
        ]
    }
}

/// Severity band derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactLevel {
    /// Bands: `>=80` critical, `>=60` high, `>=40` medium, else low.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ImpactLevel::Critical,
            60..=79 => ImpactLevel::High,
            40..=59 => ImpactLevel::Medium,
            _ => ImpactLevel::Low,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
            ImpactLevel::Critical => "critical",
        }
    }

    /// Presentation color.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            ImpactLevel::Critical => "#dc2626",
            ImpactLevel::High => "#ea580c",
            ImpactLevel::Medium => "#ca8a04",
            ImpactLevel::Low => "#16a34a",
        }
    }

    /// Presentation description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ImpactLevel::Critical => "Market-moving event, expect broad cross-asset volatility",
            ImpactLevel::High => "Significant impact likely on related assets",
            ImpactLevel::Medium => "Moderate impact, watch affected sectors",
            ImpactLevel::Low => "Limited expected market impact",
        }
    }
}

/// Composite impact score with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeScore {
    pub level: ImpactLevel,
    pub score: u8,
    pub color: String,
    pub description: String,
    pub breakdown: ScoreBreakdown,
    /// Asset classes the matched macro patterns historically move
    #[serde(default)]
    pub affected_assets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_note: Option<String>,
}

impl EdgeScore {
    /// Builds a score from its breakdown; the total and band are derived, never supplied.
    #[must_use]
    pub fn from_breakdown(
        breakdown: ScoreBreakdown,
        affected_assets: Vec<String>,
        historical_note: Option<String>,
    ) -> Self {
        let score = breakdown.total();
        let level = ImpactLevel::from_score(score);
        Self {
            level,
            score,
            color: level.color().to_string(),
            description: level.description().to_string(),
            breakdown,
            affected_assets,
            historical_note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(a: u8, b: u8, c: u8, d: u8) -> ScoreBreakdown {
        ScoreBreakdown {
            source_weight: SubScore::new(a, SOURCE_WEIGHT_MAX, "Source", ""),
            surprise_factor: SubScore::new(b, SURPRISE_FACTOR_MAX, "Surprise", ""),
            cross_asset_effect: SubScore::new(c, CROSS_ASSET_MAX, "Cross-asset", ""),
            portfolio_overlap: SubScore::new(d, PORTFOLIO_OVERLAP_MAX, "Portfolio", ""),
        }
    }

    #[test]
    fn maxima_sum_to_one_hundred() {
        assert_eq!(breakdown(0, 0, 0, 0).max_total(), 100);
    }

    #[test]
    fn sub_score_clamps_to_max() {
        let s = SubScore::new(40, SOURCE_WEIGHT_MAX, "Source", "");
        assert_eq!(s.score, 30);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(ImpactLevel::from_score(100), ImpactLevel::Critical);
        assert_eq!(ImpactLevel::from_score(80), ImpactLevel::Critical);
        assert_eq!(ImpactLevel::from_score(79), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_score(60), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_score(59), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_score(40), ImpactLevel::Medium);
        assert_eq!(ImpactLevel::from_score(39), ImpactLevel::Low);
        assert_eq!(ImpactLevel::from_score(0), ImpactLevel::Low);
    }

    #[test]
    fn edge_score_is_sum_of_parts() {
        let edge = EdgeScore::from_breakdown(breakdown(25, 25, 25, 3), vec![], None);
        assert_eq!(edge.score, 78);
        assert_eq!(edge.level, ImpactLevel::High);
        assert_eq!(edge.color, ImpactLevel::High.color());
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(ImpactLevel::Critical > ImpactLevel::High);
        assert!(ImpactLevel::Medium > ImpactLevel::Low);
    }
}
