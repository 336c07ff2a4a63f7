//! Password hashing
//!
//! bcrypt with the default work factor. Hashes are self-contained, the
//! salt and cost parameters are embedded in the output string.

use bcrypt::DEFAULT_COST;
use thiserror::Error;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}

/// Hash a plaintext password
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plain, DEFAULT_COST).map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed hash is treated as a mismatch, not an error.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    bcrypt::verify(plain, hashed).unwrap_or(false)
}
