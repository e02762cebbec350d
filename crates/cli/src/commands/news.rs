//! news CLI command: one fetch cycle through the full pipeline.

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use edge_feed_core::{NewsQuery, PortfolioAsset};
use edge_feed_data::{FeedService, NewsFeed};

use crate::commands::ConfigArgs;

/// Arguments for the news command.
#[derive(Args, Debug, Clone)]
pub struct NewsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Provider category (general, forex, crypto, merger)
    #[arg(long, default_value = "general")]
    pub category: String,

    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Maximum items to print
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Comma-separated portfolio symbols (e.g., "AAPL,SPY,BTC")
    #[arg(long, env = "EDGE_PORTFOLIO")]
    pub portfolio: Option<String>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

/// Runs the news command.
///
/// # Errors
/// Returns an error if config loading or pipeline construction fails.
pub async fn run_news(args: NewsArgs) -> Result<()> {
    let config = args.config.load()?;
    let service = FeedService::from_config(&config)?;

    let query = NewsQuery::new(args.category)
        .with_page(args.page)
        .with_limit(args.limit);
    let portfolio = args
        .portfolio
        .as_deref()
        .map(PortfolioAsset::parse_list)
        .unwrap_or_default();

    let feed = service.news(&query, &portfolio, Utc::now()).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    } else {
        print_feed(&feed);
    }
    Ok(())
}

fn print_feed(feed: &NewsFeed) {
    println!();
    println!("{}", "=".repeat(100));
    println!(
        "NEWS ({} items, sources ok: [{}], failed: [{}]{})",
        feed.items.len(),
        feed.meta.sources_ok.join(", "),
        feed.meta.sources_failed.join(", "),
        if feed.meta.stale { ", STALE" } else { "" }
    );
    println!("{}", "=".repeat(100));

    for item in &feed.items {
        let (score, level) = item
            .edge_score
            .as_ref()
            .map_or((item.relevance_score, "-"), |e| (e.score, e.level.as_str()));
        let marker = if item.in_portfolio() { "*" } else { " " };
        println!(
            "{marker} {score:>3} {level:<8} {:<16} {}",
            item.timestamp.format("%m-%d %H:%M"),
            item.title
        );
        if item.in_portfolio() {
            println!("      portfolio: {}", item.portfolio_matches.join(", "));
        }
    }
    println!();
}
