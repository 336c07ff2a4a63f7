//! User record persistence boundary
//!
//! The auth service and the identity extractors talk to the store through
//! the [`UserStore`] trait, which is handed to them explicitly at
//! construction time. [`PgUserStore`] is the production implementation.

mod postgres;

pub use postgres::PgUserStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Fields required to create a user record
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
}

/// Partial changes applied to an existing user record.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub hashed_password: Option<String>,
}

/// Persistence operations for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user whose username or email matches `identifier`
    async fn get_by_username_or_email(&self, identifier: &str)
        -> Result<Option<User>, StoreError>;

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Apply partial changes; returns `None` if no user with `id` exists
    async fn update(&self, id: Uuid, changes: ProfileChanges)
        -> Result<Option<User>, StoreError>;
}
