//! classify CLI command.

use anyhow::Result;
use clap::Args;
use edge_feed_signals::{FallbackClassifier, RuleClassifier};

use crate::commands::ConfigArgs;

/// Arguments for the classify command.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Headline or article text
    pub text: String,

    /// Skip the LLM even when one is configured
    #[arg(long)]
    pub rules_only: bool,

    /// Print the raw JSON classification
    #[arg(long)]
    pub json: bool,
}

/// Runs the classify command.
///
/// # Errors
/// Returns an error if config loading or classifier construction fails.
pub async fn run_classify(args: ClassifyArgs) -> Result<()> {
    let classifier = if args.rules_only {
        FallbackClassifier::new(RuleClassifier::new()?)
    } else {
        FallbackClassifier::from_config(&args.config.load()?.classifier)?
    };

    let classification = classifier.classify_text(&args.text).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!();
    println!(
        "relevant: {}  score: {}/100",
        classification.is_relevant, classification.score
    );
    if !classification.topics.is_empty() {
        let labels: Vec<&str> = classification.topics.iter().map(|t| t.label()).collect();
        println!("topics:   {}", labels.join(", "));
    }
    for reason in &classification.reasons {
        println!("  - {reason}");
    }
    if let Some(signal) = &classification.trading_signal {
        println!("signal:   {signal}");
    }
    println!();
    Ok(())
}
