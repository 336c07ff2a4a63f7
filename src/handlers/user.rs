//! Current-user HTTP handlers

use axum::{extract::State, Json};

use crate::auth::hash_password;
use crate::error::ApiError;
use crate::middleware::ActiveUser;
use crate::models::{UpdateProfileRequest, UserResponse};
use crate::store::ProfileChanges;
use crate::state::AppState;

/// GET /users/me - Current user's public fields
pub async fn read_me(ActiveUser(user): ActiveUser) -> Json<UserResponse> {
    Json(user.into())
}

/// PUT /users/me - Partial profile update for the current user
pub async fn update_me(
    State(state): State<AppState>,
    ActiveUser(user): ActiveUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let hashed_password = match req.password {
        Some(password) => Some(
            hash_password(&password).map_err(|e| ApiError::InternalError(e.to_string()))?,
        ),
        None => None,
    };

    let changes = ProfileChanges {
        full_name: req.full_name,
        hashed_password,
    };

    // The record can vanish between resolution and update
    let updated = state
        .auth_service
        .store()
        .update(user.id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(updated.into()))
}
