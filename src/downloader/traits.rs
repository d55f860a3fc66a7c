// Extraction engine trait definition

use async_trait::async_trait;

use super::errors::EngineError;
use super::models::EngineInfo;
use super::options::EngineOptions;

/// Seam to the external extraction engine
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Name of the engine (for logging)
    fn name(&self) -> &'static str;

    /// Fetch metadata only, nothing is written to disk
    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
    ) -> Result<EngineInfo, EngineError>;

    /// Download media to `options.output_template`.
    ///
    /// The returned metadata carries the output name the engine prepared.
    async fn download(&self, url: &str, options: &EngineOptions)
        -> Result<EngineInfo, EngineError>;
}
