//! Authentication HTTP handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, TokenPairResponse, UserResponse,
};
use crate::state::AppState;

/// POST /auth/register - Create a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()?;

    let user = state.auth_service.register(req).await?;

    Ok(Json(user.into()))
}

/// POST /auth/login - Verify credentials and issue a token pair
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let pair = state.auth_service.login(&req.username, &req.password).await?;

    Ok(Json(pair))
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let pair = state.auth_service.refresh(&req.refresh_token).await?;

    Ok(Json(pair))
}
