//! serve CLI command: runs the REST API.

use anyhow::Result;
use clap::Args;
use edge_feed_data::{spawn_cleanup, FeedService};
use edge_feed_web_api::ApiServer;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::ConfigArgs;

/// Arguments for the serve command.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Listen address (overrides `server.host`/`server.port`)
    #[arg(short, long)]
    pub addr: Option<String>,
}

/// Runs the API server until SIGINT.
///
/// # Errors
/// Returns an error if config loading, pipeline construction or binding fails.
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.config.load()?;
    let service = Arc::new(FeedService::from_config(&config)?);

    let sweep = (config.cache.cleanup_interval_secs > 0).then(|| {
        spawn_cleanup(
            service.cache(),
            Duration::from_secs(config.cache.cleanup_interval_secs),
        )
    });

    let addr = args.addr.unwrap_or_else(|| config.server.addr());
    let server = ApiServer::new(service);

    tokio::select! {
        result = server.serve(&addr) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Received SIGINT, shutting down");
        }
    }

    if let Some(handle) = sweep {
        handle.abort();
    }
    Ok(())
}
