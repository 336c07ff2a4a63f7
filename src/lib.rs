//! Authgate backend library
//!
//! User-account and authentication service: registration, credential
//! verification, and issuance/renewal of the bearer tokens guarding
//! per-user resources.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
