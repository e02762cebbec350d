//! CLI commands for the edge-feed pipeline.

pub mod calendar;
pub mod classify;
pub mod news;
pub mod score;
pub mod serve;
pub mod session;

pub use calendar::{run_calendar, CalendarArgs};
pub use classify::{run_classify, ClassifyArgs};
pub use news::{run_news, NewsArgs};
pub use score::{run_score, ScoreArgs};
pub use serve::{run_serve, ServeArgs};
pub use session::{run_session, SessionArgs};

use clap::Args;
use edge_feed_core::{AppConfig, ConfigLoader};

/// Config source shared by commands that talk to providers.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Profile overlay (`config/Config.<profile>.toml`)
    #[arg(long, env = "EDGE_PROFILE")]
    pub profile: Option<String>,
}

impl ConfigArgs {
    /// # Errors
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load(&self) -> anyhow::Result<AppConfig> {
        match &self.profile {
            Some(profile) => ConfigLoader::load_with_profile(profile),
            None => ConfigLoader::load_from(&self.config),
        }
    }
}
