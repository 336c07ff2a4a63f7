//! Middleware for the API
//!
//! Request tracing and bearer-token identity extraction.

pub mod auth;
mod tracing;

pub use auth::{ActiveUser, CurrentUser};
pub use tracing::request_tracing;
