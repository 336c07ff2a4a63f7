//! Authentication module
//!
//! - Password hashing and verification (bcrypt)
//! - Signed token issuance and validation (JWT access + refresh pairs)
//! - Registration, login and refresh flows

pub mod jwt;
pub mod password;
mod service;

pub use jwt::{Claims, TokenCodec, TokenKind};
pub use password::{hash_password, verify_password};
pub use service::{AuthError, AuthService};
