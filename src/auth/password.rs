use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt work factor; fixed for the whole deployment.
const BCRYPT_COST: u32 = 12;

/// Hashes a plaintext password with a per-call random salt.
///
/// Equal plaintexts produce different hashes across calls. A hashing failure
/// is fatal to the request; the plaintext is never persisted as a fallback.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::internal("Failed to hash password", e))
}

/// Verifies a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::internal("Failed to verify password", e))
}
