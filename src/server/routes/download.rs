use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::Value;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::MediaRequest;
use crate::downloader::DownloadedFile;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

pub const VIDEO_MIME: &str = "video/mp4";
pub const AUDIO_MIME: &str = "audio/mpeg";

/// POST /download
pub async fn download_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = payload?;
    let request = MediaRequest::from(body);
    let url = request.url()?;

    let file = state
        .extractor
        .fetch_media(url, request.format_id(), false)
        .await?;
    send_file(file, VIDEO_MIME).await
}

/// POST /download-audio. Any `format_id` in the body is ignored.
pub async fn download_audio_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = payload?;
    let request = MediaRequest::from(body);
    let url = request.url()?;

    let file = state.extractor.fetch_media(url, "bestaudio", true).await?;
    send_file(file, AUDIO_MIME).await
}

/// Stream a downloaded file as an attachment.
///
/// The body owns the file's temporary directory, which is removed once the
/// body has been sent or the client goes away.
async fn send_file(file: DownloadedFile, mime: &'static str) -> ApiResult<Response> {
    let (path, filename, workspace) = file.into_parts();

    let handle = File::open(&path).await.map_err(|err| {
        ApiError::internal(format!("Download failed: cannot open {}: {}", filename, err))
    })?;
    let length = handle.metadata().await.ok().map(|meta| meta.len());

    let stream = ReaderStream::new(handle).map(move |chunk| {
        let _workspace = &workspace;
        chunk
    });

    let mut response = Body::from_stream(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    headers.insert(header::CONTENT_DISPOSITION, content_disposition(&filename));
    if let Some(length) = length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }

    tracing::debug!(filename = %filename, ?length, mime, "Sending file");
    Ok(response)
}

/// `attachment` with an ASCII fallback name plus the exact UTF-8 name (RFC 6266)
pub fn content_disposition(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(filename)
    );

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_filename() {
        let value = content_disposition("My Clip.mp4");
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"My Clip.mp4\"; filename*=UTF-8''My%20Clip.mp4"
        );
    }

    #[test]
    fn test_unicode_and_quotes_are_escaped() {
        let value = content_disposition("Café \"live\".mp3");
        let text = value.to_str().unwrap();
        assert!(text.starts_with("attachment; filename=\"Caf_ _live_.mp3\""));
        assert!(text.ends_with("filename*=UTF-8''Caf%C3%A9%20%22live%22.mp3"));
    }
}
