use clap::{Parser, Subcommand};

mod commands;

use commands::{CalendarArgs, ClassifyArgs, NewsArgs, ScoreArgs, ServeArgs, SessionArgs};

#[derive(Parser)]
#[command(name = "edge-feed")]
#[command(about = "Market news and economic calendar with impact scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web API server
    Serve(ServeArgs),
    /// Fetch scored news once and print it
    News(NewsArgs),
    /// Fetch upcoming calendar events grouped by day
    Calendar(CalendarArgs),
    /// Compute the EdgeScore of a headline
    Score(ScoreArgs),
    /// Classify a headline into market topics
    Classify(ClassifyArgs),
    /// Show the exchange session for an instant
    Session(SessionArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::News(args) => commands::run_news(args).await,
        Commands::Calendar(args) => commands::run_calendar(args).await,
        Commands::Score(args) => commands::run_score(args),
        Commands::Classify(args) => commands::run_classify(args).await,
        Commands::Session(args) => commands::run_session(args),
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
