use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::downloader::orchestrator::DEFAULT_MAX_CONCURRENT_JOBS;
use crate::downloader::tools::{find_ytdlp, YTDLP_BINARY};
use crate::downloader::EngineOptions;

pub const DEFAULT_API_PREFIX: &str = "/v1/api";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Path all API routes are nested under
    pub api_prefix: String,
    pub ytdlp_path: String,
    pub cookies_path: Option<String>,
    pub proxy: Option<String>,
    pub max_concurrent_jobs: usize,
    pub engine_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            ytdlp_path: YTDLP_BINARY.to_string(),
            cookies_path: None,
            proxy: None,
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            engine_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            api_prefix: env::var("API_PREFIX")
                .map(|prefix| normalize_prefix(&prefix))
                .unwrap_or(defaults.api_prefix),
            ytdlp_path: non_empty_var("YTDLP_PATH").unwrap_or_else(find_ytdlp),
            cookies_path: non_empty_var("YTDLP_COOKIES"),
            proxy: non_empty_var("YTDLP_PROXY"),
            max_concurrent_jobs: parse_var("MAX_CONCURRENT_JOBS")?
                .unwrap_or(defaults.max_concurrent_jobs)
                .max(1),
            engine_timeout: parse_var::<u64>("ENGINE_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base options for every engine call
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions::default()
            .with_cookies_path(self.cookies_path.clone())
            .with_proxy(self.proxy.clone())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    non_empty_var(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("{} must be a valid number", key))
        })
        .transpose()
}

/// Leading slash, no trailing slash; "/" and "" mean no prefix
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/v1/api"), "/v1/api");
        assert_eq!(normalize_prefix("v1/api/"), "/v1/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert_eq!(config.api_prefix, "/v1/api");
        assert_eq!(config.max_concurrent_jobs, DEFAULT_MAX_CONCURRENT_JOBS);
        assert!(config.engine_timeout.is_none());
    }

    #[test]
    fn test_engine_options_carry_cookies_and_proxy() {
        let config = Config {
            cookies_path: Some("/srv/cookies.txt".into()),
            proxy: Some("socks5://127.0.0.1:1080".into()),
            ..Config::default()
        };
        let options = config.engine_options();
        assert_eq!(options.cookies_path.as_deref(), Some("/srv/cookies.txt"));
        assert_eq!(options.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(options.http_headers.len(), 6);
    }
}
