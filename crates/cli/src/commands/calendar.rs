//! calendar CLI command: upcoming releases grouped by day.

use anyhow::{bail, Result};
use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use edge_feed_core::CalendarQuery;
use edge_feed_data::{CalendarFeed, FeedService};

use crate::commands::ConfigArgs;

/// Arguments for the calendar command.
#[derive(Args, Debug, Clone)]
pub struct CalendarArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// First day (YYYY-MM-DD, defaults to today in exchange time)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day, inclusive (defaults to `from` + `days`)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Window length when `to` is omitted
    #[arg(long, default_value = "6")]
    pub days: i64,

    /// Only US-scoped events
    #[arg(long)]
    pub us_only: bool,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

/// Builds the query window, rejecting inverted ranges.
///
/// # Errors
/// Returns an error if `to` precedes `from` or `days` is negative.
pub fn resolve_window(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    days: i64,
    today: NaiveDate,
) -> Result<CalendarQuery> {
    if days < 0 {
        bail!("--days must not be negative");
    }
    let from = from.unwrap_or(today);
    let to = to.unwrap_or_else(|| from + Duration::days(days));
    if to < from {
        bail!("--to ({to}) is before --from ({from})");
    }
    Ok(CalendarQuery::new(from, to))
}

/// Runs the calendar command.
///
/// # Errors
/// Returns an error if config loading, pipeline construction or window validation fails.
pub async fn run_calendar(args: CalendarArgs) -> Result<()> {
    let config = args.config.load()?;
    let service = FeedService::from_config(&config)?;
    let now = Utc::now();

    let query = resolve_window(args.from, args.to, args.days, service.clock().today(now))?
        .us_only(args.us_only);
    let feed = service.calendar(&query, now).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    } else {
        print_feed(&feed);
    }
    Ok(())
}

fn print_feed(feed: &CalendarFeed) {
    println!();
    if feed.meta.fallback {
        println!("(live providers unavailable, showing recurring releases)");
    }
    for group in &feed.groups {
        println!("{} ({})", group.label, group.key);
        println!("{}", "-".repeat(60));
        for event in &group.events {
            println!(
                "  {:<6} {:<7} {:<4} {}",
                event.time,
                event.importance.as_str(),
                event.currency.as_deref().unwrap_or("-"),
                event.title
            );
        }
        println!();
    }
    if feed.groups.is_empty() {
        println!("No upcoming events.");
    }
}
