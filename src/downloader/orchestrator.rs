// Extraction adapter: builds engine options, calls the engine, reshapes results

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Semaphore, SemaphorePermit};

use super::errors::{DownloadError, Operation};
use super::format_selector::FormatSelector;
use super::models::{DownloadedFile, FormatEntry, VideoInfo};
use super::options::EngineOptions;
use super::traits::ExtractionEngine;

/// Engine calls allowed at once unless configured otherwise
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 4;

/// Output name template inside the per-download directory
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

pub struct Extractor {
    engine: Arc<dyn ExtractionEngine>,
    base_options: EngineOptions,
    permits: Semaphore,
}

impl Extractor {
    pub fn new(engine: Arc<dyn ExtractionEngine>) -> Self {
        Self {
            engine,
            base_options: EngineOptions::default(),
            permits: Semaphore::new(DEFAULT_MAX_CONCURRENT_JOBS),
        }
    }

    /// Options every call starts from (cookies, proxy, headers)
    pub fn with_base_options(mut self, options: EngineOptions) -> Self {
        self.base_options = options;
        self
    }

    pub fn with_max_concurrent_jobs(mut self, jobs: usize) -> Self {
        self.permits = Semaphore::new(jobs.max(1));
        self
    }

    async fn acquire(&self, operation: Operation) -> Result<SemaphorePermit<'_>, DownloadError> {
        self.permits
            .acquire()
            .await
            .map_err(|e| DownloadError::classify(operation, &e.to_string()))
    }

    /// Metadata projection for `/video-info`
    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo, DownloadError> {
        let _permit = self.acquire(Operation::Info).await?;
        tracing::info!(engine = self.engine.name(), url, "Fetching video info");

        let info = self
            .engine
            .extract_info(url, &self.base_options)
            .await
            .map_err(|e| DownloadError::from_engine(Operation::Info, e))?;

        Ok(VideoInfo::from(info))
    }

    /// Muxed formats for `/formats`
    pub async fn list_formats(&self, url: &str) -> Result<Vec<FormatEntry>, DownloadError> {
        let _permit = self.acquire(Operation::Formats).await?;
        tracing::info!(engine = self.engine.name(), url, "Listing formats");

        let info = self
            .engine
            .extract_info(url, &self.base_options)
            .await
            .map_err(|e| DownloadError::from_engine(Operation::Formats, e))?;

        let formats = FormatSelector::select(info.formats());
        tracing::debug!(
            reported = info.formats().len(),
            kept = formats.len(),
            "Selected formats"
        );
        Ok(formats)
    }

    /// Download into a fresh temporary directory.
    ///
    /// With `extract_audio`, `format_id` is ignored and the result is an MP3.
    pub async fn fetch_media(
        &self,
        url: &str,
        format_id: &str,
        extract_audio: bool,
    ) -> Result<DownloadedFile, DownloadError> {
        let workspace = tempfile::Builder::new()
            .prefix("video-fetch-")
            .tempdir()?;
        let template = workspace
            .path()
            .join(OUTPUT_TEMPLATE)
            .to_string_lossy()
            .into_owned();
        let options = self
            .base_options
            .clone()
            .for_download(template, format_id, extract_audio);

        let _permit = self.acquire(Operation::Download).await?;
        tracing::info!(
            engine = self.engine.name(),
            url,
            format = options.format.as_deref().unwrap_or_default(),
            extract_audio,
            "Downloading"
        );

        let info = self
            .engine
            .download(url, &options)
            .await
            .map_err(|e| DownloadError::from_engine(Operation::Download, e))?;

        let reported = info.output_name().ok_or_else(|| {
            DownloadError::classify(Operation::Download, "engine did not report an output filename")
        })?;
        let mut filename = Path::new(reported)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                DownloadError::classify(
                    Operation::Download,
                    &format!("unusable output filename: {}", reported),
                )
            })?;

        // the post-processor replaces the file the engine reported
        if let Some(postprocessor) = &options.postprocessor {
            filename = Path::new(&filename)
                .with_extension(postprocessor.output_extension())
                .to_string_lossy()
                .into_owned();
        }

        let path = workspace.path().join(&filename);
        tracing::info!(path = %path.display(), "Download finished");

        Ok(DownloadedFile::new(path, filename, workspace))
    }
}
