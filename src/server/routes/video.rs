use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::MediaRequest;
use crate::downloader::{FormatEntry, VideoInfo};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatEntry>,
}

/// POST /video-info
pub async fn video_info_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<VideoInfo>> {
    let Json(body) = payload?;
    let request = MediaRequest::from(body);
    let url = request.url()?;

    let info = state.extractor.fetch_info(url).await?;
    Ok(Json(info))
}

/// POST /formats
pub async fn formats_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<FormatsResponse>> {
    let Json(body) = payload?;
    let request = MediaRequest::from(body);
    let url = request.url()?;

    let formats = state.extractor.list_formats(url).await?;
    Ok(Json(FormatsResponse { formats }))
}
