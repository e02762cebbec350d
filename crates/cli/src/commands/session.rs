//! session CLI command: exchange session and labels for an instant.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use edge_feed_signals::MarketClock;

/// Arguments for the session command.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Instant to resolve (RFC 3339, defaults to now)
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,

    /// IANA timezone of the exchange
    #[arg(long, default_value = "America/New_York")]
    pub timezone: String,
}

/// Runs the session command.
///
/// # Errors
/// Returns an error for an unknown timezone.
pub fn run_session(args: SessionArgs) -> Result<()> {
    let clock = MarketClock::from_name(&args.timezone)?;
    let now = Utc::now();
    let at = args.at.unwrap_or(now);

    println!(
        "{} {} ({}) -> {}",
        clock.label_for(clock.local_date(at), now),
        clock.time_label(at),
        args.timezone,
        clock.session(at)
    );
    Ok(())
}
