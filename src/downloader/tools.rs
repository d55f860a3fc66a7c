// Locating the yt-dlp binary and probing its version

use std::path::Path;
use std::process::Command;

pub const YTDLP_BINARY: &str = "yt-dlp";

/// Result of probing a tool binary
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub path: String,
    pub version: Option<String>,
    pub is_available: bool,
}

/// Find the yt-dlp executable: common install paths first, then `PATH`.
/// Falls back to the bare name and lets the OS resolve it at spawn time.
pub fn find_ytdlp() -> String {
    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac, pip --user installs
        "/usr/bin/yt-dlp",          // System installation
    ];

    for path in common_paths {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    if let Ok(output) = Command::new("which").arg(YTDLP_BINARY).output() {
        if output.status.success() {
            let trimmed = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !trimmed.is_empty() {
                return trimmed;
            }
        }
    }

    YTDLP_BINARY.to_string()
}

/// Probe `<path> --version`
pub async fn probe_tool(path: &str) -> ToolInfo {
    let version = match tokio::process::Command::new(path)
        .arg("--version")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        _ => None,
    };

    ToolInfo {
        path: path.to_string(),
        is_available: version.is_some(),
        version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ytdlp_never_empty() {
        assert!(!find_ytdlp().is_empty());
    }

    #[tokio::test]
    async fn test_probe_missing_tool() {
        let info = probe_tool("/nonexistent/yt-dlp").await;
        assert!(!info.is_available);
        assert!(info.version.is_none());
        assert_eq!(info.path, "/nonexistent/yt-dlp");
    }
}
