// Downloader module - adapter between the HTTP layer and the extraction engine

pub mod cli;
pub mod diagnostics;
pub mod errors;
pub mod format_selector;
pub mod models;
pub mod options;
pub mod orchestrator;
pub mod tools;
pub mod traits;
pub mod utils;

pub use cli::YtDlpEngine;
pub use errors::{DownloadError, EngineError, Operation, BOT_DETECTION_MESSAGE};
pub use format_selector::FormatSelector;
pub use models::{
    DownloadedFile, EngineFormat, EngineInfo, FormatEntry, RequestedDownload, VideoInfo,
};
pub use options::{EngineMode, EngineOptions, PostProcessor};
pub use orchestrator::Extractor;
pub use traits::ExtractionEngine;
