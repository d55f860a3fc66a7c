//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::downloader::{Extractor, YtDlpEngine};
use crate::server::routes::{
    download_audio_handler, download_handler, formats_handler, health_handler, video_info_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
}

impl AppState {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }

    /// State backed by the yt-dlp binary named in `config`
    pub fn from_config(config: &Config) -> Self {
        let engine = YtDlpEngine::new(config.ytdlp_path.clone()).with_timeout(config.engine_timeout);
        let extractor = Extractor::new(Arc::new(engine))
            .with_base_options(config.engine_options())
            .with_max_concurrent_jobs(config.max_concurrent_jobs);

        Self::new(extractor)
    }
}

/// Build the Axum application router.
///
/// API routes are nested under `config.api_prefix`; CORS applies to them only.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let api = Router::new()
        .route("/health", get(health_handler))
        .route("/video-info", post(video_info_handler))
        .route("/formats", post(formats_handler))
        .route("/download", post(download_handler))
        .route("/download-audio", post(download_audio_handler))
        .layer(cors)
        .with_state(state);

    let app = if config.api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(&config.api_prefix, api)
    };

    app.layer(TraceLayer::new_for_http())
}
