// Main entry point for the video fetch API

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use video_fetch_api::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,video_fetch_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        prefix = %config.api_prefix,
        ytdlp = %config.ytdlp_path,
        max_jobs = config.max_concurrent_jobs,
        "Configuration loaded"
    );

    video_fetch_api::run(config).await
}
