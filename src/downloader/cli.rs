// CLI extraction engine - runs the native `yt-dlp` binary
//
// Metadata and download calls both print a single JSON document on stdout.
// In download mode that JSON also carries the prepared output filename.

use std::time::Duration;

use async_trait::async_trait;

use super::errors::EngineError;
use super::models::EngineInfo;
use super::options::{EngineMode, EngineOptions, PostProcessor};
use super::traits::ExtractionEngine;
use super::utils::run_output;

/// Engine backed by the yt-dlp binary
pub struct YtDlpEngine {
    ytdlp_path: String,
    timeout: Option<Duration>,
}

impl YtDlpEngine {
    pub fn new(ytdlp_path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build command arguments
    pub fn build_args(url: &str, options: &EngineOptions, mode: EngineMode) -> Vec<String> {
        let mut args = vec![
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--no-color".to_string(),
            "--no-playlist".to_string(),
            "--no-check-certificates".to_string(),
            "--dump-single-json".to_string(),
        ];

        for (name, value) in &options.http_headers {
            args.push("--add-header".to_string());
            args.push(format!("{}:{}", name, value));
        }

        if let Some(extractor_args) = &options.extractor_args {
            args.push("--extractor-args".to_string());
            args.push(extractor_args.clone());
        }

        // Cookies
        if let Some(path) = &options.cookies_path {
            args.push("--cookies".to_string());
            args.push(path.clone());
        }

        // Proxy
        if let Some(proxy) = &options.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }

        if mode == EngineMode::Download {
            if let Some(format) = &options.format {
                args.push("-f".to_string());
                args.push(format.clone());
            }

            if let Some(template) = &options.output_template {
                args.push("-o".to_string());
                args.push(template.clone());
            }

            if let Some(container) = &options.merge_output_format {
                args.push("--merge-output-format".to_string());
                args.push(container.clone());
            }

            match &options.postprocessor {
                Some(PostProcessor::ExtractAudio { codec, quality }) => {
                    args.push("--extract-audio".to_string());
                    args.push("--audio-format".to_string());
                    args.push(codec.clone());
                    args.push("--audio-quality".to_string());
                    args.push(format!("{}K", quality));
                }
                None => {}
            }

            // --dump-single-json implies simulate
            args.push("--no-simulate".to_string());
        }

        // Everything after `--` is positional, so URLs starting with '-' can't pose as flags
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    async fn run(
        &self,
        url: &str,
        options: &EngineOptions,
        mode: EngineMode,
    ) -> Result<EngineInfo, EngineError> {
        let args = Self::build_args(url, options, mode);
        tracing::debug!(
            engine = self.name(),
            ?mode,
            "Running: {} {}",
            self.ytdlp_path,
            args.join(" ")
        );

        let output = run_output(&self.ytdlp_path, &args, self.timeout).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(
                engine = self.name(),
                status = ?output.status.code(),
                "yt-dlp failed: {}",
                stderr
            );
            let message = if stderr.is_empty() {
                format!("yt-dlp exited with {}", output.status)
            } else {
                stderr
            };
            return Err(EngineError::Failed(message));
        }

        Self::parse_json(&output.stdout)
    }

    fn parse_json(stdout: &[u8]) -> Result<EngineInfo, EngineError> {
        Ok(serde_json::from_slice(stdout)?)
    }
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &EngineOptions,
    ) -> Result<EngineInfo, EngineError> {
        self.run(url, options, EngineMode::Metadata).await
    }

    async fn download(
        &self,
        url: &str,
        options: &EngineOptions,
    ) -> Result<EngineInfo, EngineError> {
        self.run(url, options, EngineMode::Download).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(|s| s.as_str())
    }

    #[test]
    fn test_metadata_args_skip_download_options() {
        let options = EngineOptions::default().with_format("137");
        let args = YtDlpEngine::build_args("https://youtu.be/abc", &options, EngineMode::Metadata);

        assert!(args.contains(&"--dump-single-json".to_string()));
        assert!(!args.contains(&"-f".to_string()));
        assert!(!args.contains(&"--no-simulate".to_string()));
        assert_eq!(
            value_after(&args, "--extractor-args"),
            Some("youtube:player_client=android,web;skip=hls,dash")
        );
        assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/abc"));
        assert_eq!(args[args.len() - 2], "--");
    }

    #[test]
    fn test_headers_become_add_header_flags() {
        let args = YtDlpEngine::build_args(
            "https://youtu.be/abc",
            &EngineOptions::default(),
            EngineMode::Metadata,
        );
        let headers: Vec<&String> = args
            .iter()
            .zip(args.iter().skip(1))
            .filter(|(flag, _)| *flag == "--add-header")
            .map(|(_, value)| value)
            .collect();

        assert_eq!(headers.len(), 6);
        assert!(headers[0].starts_with("User-Agent:Mozilla/5.0 (Windows NT 10.0"));
        assert!(headers.iter().any(|h| *h == "Connection:keep-alive"));
    }

    #[test]
    fn test_video_download_args() {
        let options = EngineOptions::default()
            .with_proxy(Some("socks5://127.0.0.1:1080".into()))
            .for_download("/tmp/x/%(title)s.%(ext)s".into(), "best", false);
        let args = YtDlpEngine::build_args("https://youtu.be/abc", &options, EngineMode::Download);

        assert_eq!(value_after(&args, "-f"), Some("best"));
        assert_eq!(value_after(&args, "-o"), Some("/tmp/x/%(title)s.%(ext)s"));
        assert_eq!(value_after(&args, "--merge-output-format"), Some("mp4"));
        assert_eq!(value_after(&args, "--proxy"), Some("socks5://127.0.0.1:1080"));
        assert!(args.contains(&"--no-simulate".to_string()));
        assert!(!args.contains(&"--extract-audio".to_string()));
    }

    #[test]
    fn test_audio_download_args() {
        let options = EngineOptions::default()
            .with_cookies_path(Some("/etc/cookies.txt".into()))
            .for_download("/tmp/x/%(title)s.%(ext)s".into(), "22", true);
        let args = YtDlpEngine::build_args("https://youtu.be/abc", &options, EngineMode::Download);

        assert_eq!(value_after(&args, "-f"), Some("bestaudio/best"));
        assert_eq!(value_after(&args, "--audio-format"), Some("mp3"));
        assert_eq!(value_after(&args, "--audio-quality"), Some("192K"));
        assert_eq!(value_after(&args, "--cookies"), Some("/etc/cookies.txt"));
        assert!(args.contains(&"--extract-audio".to_string()));
        assert!(!args.contains(&"--merge-output-format".to_string()));
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        let err = YtDlpEngine::parse_json(b"not json").unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_run_surfaces_stderr() {
        let engine = YtDlpEngine::new("false");
        let err = engine
            .extract_info("https://youtu.be/abc", &EngineOptions::default())
            .await
            .unwrap_err();
        match err {
            EngineError::Failed(message) => assert!(message.starts_with("yt-dlp exited with")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
