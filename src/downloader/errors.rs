// Error types for the extraction engine and the adapter on top of it

use std::time::Duration;

use thiserror::Error;

use super::diagnostics::is_bot_detection;

/// Advisory surfaced instead of the raw engine text when the site refuses automated access.
pub const BOT_DETECTION_MESSAGE: &str =
    "YouTube bot detection triggered. Try using cookies or wait a few minutes.";

/// Failure reported by an engine invocation, before classification.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and exited unsuccessfully; carries its stderr
    #[error("{0}")]
    Failed(String),

    /// The engine did not finish within the configured timeout
    #[error("Timed out after {0:?}")]
    TimedOut(Duration),

    /// The engine output was not the JSON we expected
    #[error("Invalid JSON from engine: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading the engine's pipes failed
    #[error("I/O error while running engine: {0}")]
    Io(#[from] std::io::Error),
}

/// Adapter operation, used to prefix generic failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Info,
    Formats,
    Download,
}

impl Operation {
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Self::Info => "Failed to get video info",
            Self::Formats => "Failed to get formats",
            Self::Download => "Download failed",
        }
    }
}

/// Error surfaced by the extraction adapter.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Source site refused automated access
    #[error("{}", BOT_DETECTION_MESSAGE)]
    BotDetection,

    /// Any other engine failure, with the operation that hit it
    #[error("{}: {message}", .operation.failure_prefix())]
    Engine { operation: Operation, message: String },

    /// Local filesystem failure around a download
    #[error("Download failed: {0}")]
    Workspace(#[from] std::io::Error),
}

impl DownloadError {
    /// Reclassify raw engine error text for the given operation.
    pub fn classify(operation: Operation, raw: &str) -> Self {
        if is_bot_detection(raw) {
            return Self::BotDetection;
        }

        Self::Engine {
            operation,
            message: raw.trim().to_string(),
        }
    }

    pub fn from_engine(operation: Operation, err: EngineError) -> Self {
        Self::classify(operation, &err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_marker_maps_to_advisory() {
        let raw = "ERROR: [youtube] abc: Sign in to confirm you're not a bot";
        for op in [Operation::Info, Operation::Formats, Operation::Download] {
            let err = DownloadError::classify(op, raw);
            assert!(matches!(err, DownloadError::BotDetection));
            assert_eq!(err.to_string(), BOT_DETECTION_MESSAGE);
        }
    }

    #[test]
    fn test_generic_failure_keeps_operation_prefix() {
        let raw = "ERROR: Unsupported URL: https://example.com\n";
        assert_eq!(
            DownloadError::classify(Operation::Info, raw).to_string(),
            "Failed to get video info: ERROR: Unsupported URL: https://example.com"
        );
        assert_eq!(
            DownloadError::classify(Operation::Formats, raw).to_string(),
            "Failed to get formats: ERROR: Unsupported URL: https://example.com"
        );
        assert_eq!(
            DownloadError::classify(Operation::Download, raw).to_string(),
            "Download failed: ERROR: Unsupported URL: https://example.com"
        );
    }

    #[test]
    fn test_timeout_is_generic() {
        let err = DownloadError::from_engine(
            Operation::Download,
            EngineError::TimedOut(Duration::from_secs(30)),
        );
        assert_eq!(err.to_string(), "Download failed: Timed out after 30s");
    }

    #[test]
    fn test_sub_second_timeout_keeps_its_unit() {
        let err = EngineError::TimedOut(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Timed out after 250ms");
    }
}
