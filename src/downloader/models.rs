// Data models: raw engine metadata and the reduced API projections

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tempfile::TempDir;

/// Longest description returned by the info endpoint, in characters
pub const DESCRIPTION_LIMIT: usize = 200;

/// Metadata as printed by the engine (`--dump-single-json`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<Number>,
    pub uploader: Option<String>,
    pub view_count: Option<u64>,
    pub description: Option<String>,
    pub formats: Option<Vec<EngineFormat>>,
    /// One entry per file written; only present after a real download
    pub requested_downloads: Option<Vec<RequestedDownload>>,
    /// Output name the engine prepared for the download
    pub filename: Option<String>,
    #[serde(rename = "_filename")]
    pub legacy_filename: Option<String>,
}

impl EngineInfo {
    pub fn formats(&self) -> &[EngineFormat] {
        self.formats.as_deref().unwrap_or_default()
    }

    /// Where the downloaded file ended up.
    ///
    /// Prefers the last requested download, whose `filepath` is the path after
    /// post-processing. Top-level names are only printed by some versions.
    pub fn output_name(&self) -> Option<&str> {
        self.requested_downloads
            .as_deref()
            .and_then(|downloads| downloads.iter().rev().find_map(RequestedDownload::output_name))
            .or(self.filename.as_deref())
            .or(self.legacy_filename.as_deref())
    }
}

/// A file the engine wrote for one video
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestedDownload {
    /// Final path after merging and post-processing
    pub filepath: Option<String>,
    pub filename: Option<String>,
    #[serde(rename = "_filename")]
    pub legacy_filename: Option<String>,
}

impl RequestedDownload {
    pub fn output_name(&self) -> Option<&str> {
        self.filepath
            .as_deref()
            .or(self.filename.as_deref())
            .or(self.legacy_filename.as_deref())
    }
}

/// One format entry as reported by the engine
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineFormat {
    pub format_id: Option<String>,
    pub ext: Option<String>,
    /// Resolution string (e.g., "1920x1080", "audio only")
    pub resolution: Option<String>,
    pub filesize: Option<u64>,
    /// Format note (e.g., "1080p", "medium")
    pub format_note: Option<String>,
    /// Video codec, the literal "none" when absent
    pub vcodec: Option<String>,
    /// Audio codec, the literal "none" when absent
    pub acodec: Option<String>,
}

impl EngineFormat {
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some("none")
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }
}

/// Video information returned by `/video-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<Number>,
    pub uploader: Option<String>,
    pub view_count: Option<u64>,
    pub description: String,
}

impl From<EngineInfo> for VideoInfo {
    fn from(info: EngineInfo) -> Self {
        Self {
            id: info.id,
            title: info.title,
            thumbnail: info.thumbnail,
            duration: info.duration,
            uploader: info.uploader,
            view_count: info.view_count,
            description: info
                .description
                .as_deref()
                .map(truncate_description)
                .unwrap_or_default(),
        }
    }
}

/// Cut a description to the first 200 characters and mark it with an ellipsis.
/// Empty descriptions stay empty.
pub fn truncate_description(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }

    let mut short: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    short.push_str("...");
    short
}

/// Format entry returned by `/formats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatEntry {
    pub format_id: Option<String>,
    pub ext: Option<String>,
    pub resolution: String,
    pub filesize: Option<u64>,
    pub quality: String,
}

/// A file produced by the engine inside its own temporary directory.
///
/// The directory is removed when this value is dropped, so keep it alive
/// until the file has been sent.
#[derive(Debug)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub filename: String,
    workspace: TempDir,
}

impl DownloadedFile {
    pub fn new(path: PathBuf, filename: String, workspace: TempDir) -> Self {
        Self {
            path,
            filename,
            workspace,
        }
    }

    /// Split into the file location and the guard owning its directory
    pub fn into_parts(self) -> (PathBuf, String, TempDir) {
        (self.path, self.filename, self.workspace)
    }
}
