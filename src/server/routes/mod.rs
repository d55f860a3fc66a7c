// HTTP routes
pub mod download;
pub mod health;
pub mod video;

pub use download::*;
pub use health::*;
pub use video::*;

use serde_json::Value;

use crate::downloader::options::DEFAULT_FORMAT;
use crate::server::error::{ApiError, ApiResult, URL_REQUIRED};

/// JSON body shared by the POST endpoints
#[derive(Debug, Default)]
pub struct MediaRequest {
    pub url: Option<String>,
    pub format_id: Option<String>,
}

/// Any well-formed JSON is accepted; fields that are absent or not strings
/// count as missing.
impl From<Value> for MediaRequest {
    fn from(body: Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            url: field("url"),
            format_id: field("format_id"),
        }
    }
}

impl MediaRequest {
    /// The requested URL; missing, null and empty are all rejected
    pub fn url(&self) -> ApiResult<&str> {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ApiError::bad_request(URL_REQUIRED)),
        }
    }

    pub fn format_id(&self) -> &str {
        match self.format_id.as_deref() {
            Some(format_id) if !format_id.is_empty() => format_id,
            _ => DEFAULT_FORMAT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_url_validation() {
        let missing = MediaRequest::default();
        let err = missing.url().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), URL_REQUIRED);

        let empty = MediaRequest::from(json!({"url": ""}));
        assert!(empty.url().is_err());

        let ok = MediaRequest::from(json!({"url": "https://youtu.be/abc"}));
        assert_eq!(ok.url().unwrap(), "https://youtu.be/abc");
    }

    #[test]
    fn test_non_string_url_counts_as_missing() {
        for body in [json!({"url": 123}), json!({"url": ["a"]}), json!(null), json!("u"), json!([])] {
            let request = MediaRequest::from(body);
            assert_eq!(request.url().unwrap_err().message(), URL_REQUIRED);
        }
    }

    #[test]
    fn test_format_id_defaults_to_best() {
        assert_eq!(MediaRequest::default().format_id(), "best");
        assert_eq!(MediaRequest::from(json!({"format_id": 22})).format_id(), "best");

        let chosen = MediaRequest::from(json!({"url": "u", "format_id": "137+140"}));
        assert_eq!(chosen.format_id(), "137+140");
    }
}
