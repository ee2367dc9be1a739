//! Title-scraping HTTP handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::{ApiError, AppState};
use marque_core::FetchTitleResponse;

/// Request body for the title-scraping endpoint.
#[derive(Debug, Deserialize)]
pub struct FetchTitlePayload {
    pub url: Option<String>,
}

/// Fetch a URL and extract its page title.
///
/// # Returns
/// - 200 OK with `{title}` (`title` is null when the page has none)
/// - 400 Bad Request for malformed bodies, missing/invalid URLs, and
///   upstream fetch failures (non-success status, timeout)
pub async fn fetch_title(
    State(state): State<AppState>,
    payload: Result<Json<FetchTitlePayload>, JsonRejection>,
) -> Result<Json<FetchTitleResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let url = payload
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("URL is required".to_string()))?;

    let title = state.fetcher.fetch_title(&url).await?;
    Ok(Json(FetchTitleResponse { title }))
}
