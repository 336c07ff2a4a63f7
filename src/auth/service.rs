//! Registration, login and refresh flows
//!
//! The service is stateless between calls; all user state lives behind the
//! [`UserStore`] handle it is constructed with.

use std::sync::Arc;

use thiserror::Error;

use crate::error::ApiError;
use crate::models::{RegisterRequest, TokenPairResponse, User};
use crate::store::{NewUser, StoreError, UserStore};

use super::jwt::{JwtError, TokenCodec, TokenKind};
use super::password::{hash_password, verify_password, PasswordError};

/// Auth flow errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveAccount,

    #[error("Invalid refresh token")]
    InvalidToken,

    #[error(transparent)]
    Hashing(#[from] PasswordError),

    #[error("Token encoding failed: {0}")]
    TokenEncoding(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateEmail | AuthError::DuplicateUsername => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::InvalidCredentials => ApiError::Unauthorized(e.to_string()),
            AuthError::InactiveAccount => ApiError::BadRequest(e.to_string()),
            AuthError::InvalidToken => ApiError::Unauthorized(e.to_string()),
            AuthError::Hashing(_) | AuthError::TokenEncoding(_) => {
                ApiError::InternalError(e.to_string())
            }
            AuthError::Store(err) => ApiError::DatabaseError(err.to_string()),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    codec: TokenCodec,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, codec: TokenCodec) -> Self {
        Self { store, codec }
    }

    /// Register a new user.
    ///
    /// The email conflict is checked before the username conflict, so a
    /// request colliding on both reports the email conflict.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AuthError> {
        if self.store.get_by_email(&req.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        if self.store.get_by_username(&req.username).await?.is_some() {
            return Err(AuthError::DuplicateUsername);
        }

        let hashed_password = hash_password(&req.password)?;

        let user = self
            .store
            .create(NewUser {
                email: req.email,
                username: req.username,
                hashed_password,
                full_name: req.full_name,
            })
            .await?;

        tracing::info!(username = %user.username, "User registered");

        Ok(user)
    }

    /// Verify credentials and issue an access + refresh token pair.
    ///
    /// Lookup is by exact username only. A missing user and a password
    /// mismatch are indistinguishable to the caller.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenPairResponse, AuthError> {
        let user = self
            .store
            .get_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.hashed_password) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::InactiveAccount);
        }

        self.issue_pair(&user.username)
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Every failure mode reports uniformly as an invalid token, including
    /// an inactive subject. The presented refresh token is not invalidated;
    /// with no revocation store it remains usable until natural expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPairResponse, AuthError> {
        let claims = self
            .codec
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .store
            .get_by_username_or_email(&claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !user.is_active {
            return Err(AuthError::InvalidToken);
        }

        self.issue_pair(&user.username)
    }

    fn issue_pair(&self, username: &str) -> Result<TokenPairResponse, AuthError> {
        let access_token = self.codec.issue(username, TokenKind::Access)?;
        let refresh_token = self.codec.issue(username, TokenKind::Refresh)?;
        Ok(TokenPairResponse::new(access_token, refresh_token))
    }

    /// Token codec, for bearer verification in the identity extractors
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// User store handle, for identity resolution and profile updates
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::EncodingFailed(msg) => AuthError::TokenEncoding(msg),
            JwtError::InvalidOrExpired => AuthError::InvalidToken,
        }
    }
}
