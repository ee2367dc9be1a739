//! User HTTP handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{ApiError, AppState};
use marque_core::{CreateUserRequest, User, UserRepository, UserSummary};

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// List all users with their link counts.
///
/// # Returns
/// - 200 OK with array of user summaries
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.db.users.list().await?;
    Ok(Json(users))
}

/// Create a new user.
///
/// # Returns
/// - 201 Created with the user
/// - 400 Bad Request when the body is malformed or the email is missing,
///   malformed, or taken
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email is required".to_string()))?;

    let user = state
        .db
        .users
        .insert(CreateUserRequest {
            email,
            name: payload.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
