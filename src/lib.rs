pub mod config;
pub mod downloader;
pub mod server;

use anyhow::{Context, Result};

pub use config::Config;
pub use server::{build_app, AppState};

/// Bind, serve and wait for Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    let tool = downloader::tools::probe_tool(&config.ytdlp_path).await;
    if tool.is_available {
        tracing::info!(
            path = %tool.path,
            version = tool.version.as_deref().unwrap_or_default(),
            "Found yt-dlp"
        );
    } else {
        tracing::warn!(
            path = %tool.path,
            "yt-dlp not available; extraction requests will fail until it is installed"
        );
    }

    let app = build_app(AppState::from_config(&config), &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://{}{}/health", addr, config.api_prefix);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
