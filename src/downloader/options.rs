// Options handed to the extraction engine on every call

/// Browser headers sent with every engine request
pub const BROWSER_HEADERS: [(&str, &str); 6] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Language", "en-us,en;q=0.5"),
    ("Accept-Encoding", "gzip,deflate"),
    ("Accept-Charset", "ISO-8859-1,utf-8;q=0.7,*;q=0.7"),
    ("Connection", "keep-alive"),
];

/// YouTube extractor hints: android client first, skip HLS/DASH manifests
pub const YOUTUBE_EXTRACTOR_ARGS: &str = "youtube:player_client=android,web;skip=hls,dash";

/// Format selector used when the caller doesn't pick one
pub const DEFAULT_FORMAT: &str = "best";

/// Format selector forced for audio extraction
pub const AUDIO_FORMAT: &str = "bestaudio/best";

/// Whether the engine should only report metadata or also fetch media
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    Metadata,
    Download,
}

/// Post-processing step applied by the engine after download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    /// Extract the audio track and transcode it
    ExtractAudio {
        codec: String,
        quality: String,
    },
}

impl PostProcessor {
    /// MP3 at 192 kbps
    pub fn mp3() -> Self {
        Self::ExtractAudio {
            codec: "mp3".to_string(),
            quality: "192".to_string(),
        }
    }

    /// Extension of the file left behind by this step
    pub fn output_extension(&self) -> &str {
        match self {
            Self::ExtractAudio { codec, .. } => codec,
        }
    }
}

/// Engine options for one call
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Extra HTTP headers (name, value)
    pub http_headers: Vec<(String, String)>,
    /// Site-specific extractor hints
    pub extractor_args: Option<String>,
    /// Format selector (e.g., "best", "137+140", "bestaudio/best")
    pub format: Option<String>,
    /// Output path template (e.g., "/tmp/abc/%(title)s.%(ext)s")
    pub output_template: Option<String>,
    /// Container to merge separate video/audio streams into
    pub merge_output_format: Option<String>,
    /// Step to run on the downloaded file
    pub postprocessor: Option<PostProcessor>,
    /// Path to cookies.txt file
    pub cookies_path: Option<String>,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            http_headers: BROWSER_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            extractor_args: Some(YOUTUBE_EXTRACTOR_ARGS.to_string()),
            format: None,
            output_template: None,
            merge_output_format: None,
            postprocessor: None,
            cookies_path: None,
            proxy: None,
        }
    }
}

impl EngineOptions {
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    pub fn with_merge_output_format(mut self, format: Option<String>) -> Self {
        self.merge_output_format = format;
        self
    }

    pub fn with_postprocessor(mut self, postprocessor: Option<PostProcessor>) -> Self {
        self.postprocessor = postprocessor;
        self
    }

    pub fn with_cookies_path(mut self, path: Option<String>) -> Self {
        self.cookies_path = path;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Options for fetching media to `output_template`.
    ///
    /// Video mode merges into mp4. Audio mode ignores `format` and forces
    /// the best audio stream through MP3 extraction.
    pub fn for_download(self, output_template: String, format: &str, extract_audio: bool) -> Self {
        let with_template = self.with_output_template(output_template);

        if extract_audio {
            with_template
                .with_format(AUDIO_FORMAT)
                .with_merge_output_format(None)
                .with_postprocessor(Some(PostProcessor::mp3()))
        } else {
            with_template
                .with_format(format)
                .with_merge_output_format(Some("mp4".to_string()))
                .with_postprocessor(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_carries_browser_headers() {
        let options = EngineOptions::default();
        assert_eq!(options.http_headers.len(), 6);
        assert_eq!(options.http_headers[0].0, "User-Agent");
        assert!(options.http_headers[0].1.contains("Chrome/120.0.0.0"));
        assert_eq!(options.extractor_args.as_deref(), Some(YOUTUBE_EXTRACTOR_ARGS));
        assert!(options.format.is_none());
    }

    #[test]
    fn test_video_download_merges_to_mp4() {
        let options = EngineOptions::default().for_download(
            "/tmp/x/%(title)s.%(ext)s".into(),
            "137+140",
            false,
        );
        assert_eq!(options.format.as_deref(), Some("137+140"));
        assert_eq!(options.merge_output_format.as_deref(), Some("mp4"));
        assert!(options.postprocessor.is_none());
    }

    #[test]
    fn test_audio_download_ignores_format() {
        let options = EngineOptions::default().for_download(
            "/tmp/x/%(title)s.%(ext)s".into(),
            "137",
            true,
        );
        assert_eq!(options.format.as_deref(), Some(AUDIO_FORMAT));
        assert!(options.merge_output_format.is_none());
        assert_eq!(options.postprocessor, Some(PostProcessor::mp3()));
        assert_eq!(PostProcessor::mp3().output_extension(), "mp3");
    }
}
