//! Bearer-token identity extraction
//!
//! Extractors that resolve the current authenticated user from the
//! `Authorization: Bearer` header. [`CurrentUser`] only proves identity;
//! [`ActiveUser`] layers the active-account check on top. Protected
//! endpoints that require an active account take [`ActiveUser`].

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::auth::AuthService;
use crate::error::ApiError;
use crate::models::User;

/// The user resolved from a bearer token.
///
/// Rejects with 401 when the header is missing, the token does not verify,
/// or the subject does not resolve to a stored user. Which of those failed
/// is not reported.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unauthenticated =
            || ApiError::Unauthorized("Could not validate credentials".to_string());

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| unauthenticated())?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        let claims = auth_service
            .codec()
            .verify(bearer.token())
            .map_err(|_| unauthenticated())?;

        let user = auth_service
            .store()
            .get_by_username_or_email(&claims.sub)
            .await?
            .ok_or_else(unauthenticated)?;

        Ok(CurrentUser(user))
    }
}

/// A resolved user that is also active.
///
/// Rejects with 400 when the account is inactive, a distinct status from
/// the 401 produced by failed identity resolution.
#[derive(Debug, Clone)]
pub struct ActiveUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for ActiveUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_active {
            return Err(ApiError::BadRequest("Inactive user".to_string()));
        }

        Ok(ActiveUser(user))
    }
}
