//! score CLI command: EdgeScore breakdown for one headline.

use anyhow::Result;
use clap::Args;
use edge_feed_core::{EdgeScore, PortfolioAsset, Sentiment};
use edge_feed_signals::{resolve_sentiment, ImpactScorer, ScoreInput};

/// Arguments for the score command.
#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Headline or article text
    pub text: String,

    /// Source name or domain (e.g., "bloomberg.com")
    #[arg(long, default_value = "")]
    pub source: String,

    #[arg(long, default_value = "")]
    pub url: String,

    /// bullish, bearish or neutral (inferred from the text when omitted)
    #[arg(long)]
    pub sentiment: Option<String>,

    /// Provider quality rating (0-100)
    #[arg(long)]
    pub source_quality: Option<u8>,

    /// Comma-separated portfolio symbols
    #[arg(long, env = "EDGE_PORTFOLIO")]
    pub portfolio: Option<String>,

    /// Print the raw JSON score
    #[arg(long)]
    pub json: bool,
}

/// Builds the scorer input from CLI arguments.
#[must_use]
pub fn score_input(args: &ScoreArgs) -> ScoreInput {
    let provided = args.sentiment.as_deref().map(Sentiment::parse);
    let mut input = ScoreInput::new(args.text.clone(), args.source.clone())
        .with_url(args.url.clone())
        .with_sentiment(resolve_sentiment(provided, &args.text));
    if let Some(quality) = args.source_quality {
        input = input.with_source_quality(quality);
    }
    input
}

/// Runs the score command.
///
/// # Errors
/// Returns an error if the score cannot be serialized.
pub fn run_score(args: ScoreArgs) -> Result<()> {
    let symbols: Vec<String> = args
        .portfolio
        .as_deref()
        .map(PortfolioAsset::parse_list)
        .unwrap_or_default()
        .into_iter()
        .map(|a| a.symbol)
        .collect();
    let portfolio = (!symbols.is_empty()).then_some(symbols.as_slice());

    let score = ImpactScorer::new().score(&score_input(&args), portfolio);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&score)?);
    } else {
        print_score(&score);
    }
    Ok(())
}

fn print_score(score: &EdgeScore) {
    println!();
    println!(
        "EdgeScore {}/100 ({}): {}",
        score.score,
        score.level.as_str(),
        score.description
    );
    println!("{}", "-".repeat(60));
    let b = &score.breakdown;
    for part in [
        &b.source_weight,
        &b.surprise_factor,
        &b.cross_asset_effect,
        &b.portfolio_overlap,
    ] {
        println!(
            "  {:<20} {:>2}/{:<2}  {}",
            part.label, part.score, part.max_score, part.description
        );
    }
    if !score.affected_assets.is_empty() {
        println!("  affects: {}", score.affected_assets.join(", "));
    }
    if let Some(note) = &score.historical_note {
        println!("  note: {note}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str, sentiment: Option<&str>) -> ScoreArgs {
        ScoreArgs {
            text: text.to_string(),
            source: "bloomberg.com".to_string(),
            url: String::new(),
            sentiment: sentiment.map(str::to_string),
            source_quality: None,
            portfolio: None,
            json: false,
        }
    }

    #[test]
    fn explicit_sentiment_wins() {
        let input = score_input(&args("Stocks surge to record", Some("bearish")));
        assert_eq!(input.sentiment, Sentiment::Bearish);
    }

    #[test]
    fn sentiment_is_inferred_when_omitted() {
        let input = score_input(&args("Stocks surge to record", None));
        assert_eq!(input.sentiment, Sentiment::Bullish);
    }
}
