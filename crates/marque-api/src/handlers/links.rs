//! Link HTTP handlers.
//!
//! The links collection lives at `/api/links`. Following the original
//! client, `PATCH` and `DELETE` carry the target id in the JSON body;
//! a path-parameter `GET /api/links/:id` exists for direct lookups.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiError, AppState};
use marque_core::{
    CreateLinkRequest, Link, LinkRepository, ListLinksRequest, ListLinksResponse,
    UpdateLinkRequest,
};

/// Request body for creating a link. `url` and `userId` are validated by
/// hand so missing fields produce a 400 with a readable message instead of
/// a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkPayload {
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_id: Option<Uuid>,
}

/// Request body for updating a link.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkPayload {
    pub id: Option<Uuid>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Request body for deleting a link.
#[derive(Debug, Deserialize)]
pub struct DeleteLinkPayload {
    pub id: Option<Uuid>,
}

/// List links with filtering, sorting, and pagination.
///
/// # Query Parameters
/// - `userId`: restrict to one owner (optional)
/// - `tag`: restrict to links whose tag array contains the value (optional)
/// - `search`: case-insensitive substring over url and title (optional)
/// - `orderBy`: `createdAt` (default) | `title` | `url`
/// - `order`: `asc` | `desc` (default)
/// - `page`, `limit`: 1-based pagination
///
/// # Returns
/// - 200 OK with `{data, pagination}` envelope
pub async fn list_links(
    State(state): State<AppState>,
    Query(query): Query<ListLinksRequest>,
) -> Result<Json<ListLinksResponse>, ApiError> {
    let response = state.db.links.list(query).await?;
    Ok(Json(response))
}

/// Get a single link by ID.
///
/// # Returns
/// - 200 OK with the link
/// - 404 Not Found if the link doesn't exist
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Link>, ApiError> {
    let link = state.db.links.fetch(id).await?;
    Ok(Json(link))
}

/// Save a new link.
///
/// # Returns
/// - 201 Created with the saved link
/// - 400 Bad Request when the body is malformed, `url` or `userId` is
///   missing/invalid, or the user does not exist
pub async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let url = payload
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("URL is required".to_string()))?;
    let user_id = payload
        .user_id
        .ok_or_else(|| ApiError::BadRequest("userId is required".to_string()))?;

    let link = state
        .db
        .links
        .insert(CreateLinkRequest {
            url,
            title: payload.title,
            tags: payload.tags,
            user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Update a link by ID (id carried in the body).
///
/// # Returns
/// - 200 OK with the updated link
/// - 400 Bad Request when the body is malformed, `id` is missing, or a
///   field is invalid
/// - 404 Not Found if the link doesn't exist
pub async fn update_link(
    State(state): State<AppState>,
    payload: Result<Json<UpdateLinkPayload>, JsonRejection>,
) -> Result<Json<Link>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = payload
        .id
        .ok_or_else(|| ApiError::BadRequest("ID is required".to_string()))?;

    let link = state
        .db
        .links
        .update(UpdateLinkRequest {
            id,
            url: payload.url,
            title: payload.title,
            tags: payload.tags,
        })
        .await?;

    Ok(Json(link))
}

/// Delete a link by ID (id carried in the body).
///
/// # Returns
/// - 204 No Content on success
/// - 400 Bad Request when the body is malformed or `id` is missing
/// - 404 Not Found if the link doesn't exist
pub async fn delete_link(
    State(state): State<AppState>,
    payload: Result<Json<DeleteLinkPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = payload
        .id
        .ok_or_else(|| ApiError::BadRequest("ID is required".to_string()))?;

    state.db.links.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all distinct tags across saved links (feeds the tag-filter UI).
///
/// # Returns
/// - 200 OK with a sorted array of tag names
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let tags = state.db.links.distinct_tags().await?;
    Ok(Json(tags))
}
