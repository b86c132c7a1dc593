use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Bearer tokens expire this long after issuance. There is no refresh or
/// revocation mechanism; clients simply log in again.
pub const TOKEN_TTL_MINUTES: i64 = 30;

/// Claims encoded within a bearer token (JWT).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Store-assigned identifier of the authenticated user.
    pub user_id: i32,
    /// Email of the authenticated user at issuance time.
    pub email: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Signs a token for the given user, expiring in [`TOKEN_TTL_MINUTES`].
///
/// The signing secret is injected by the caller; this module never reads
/// ambient configuration.
pub fn generate_token(user_id: i32, email: &str, secret: &str) -> Result<String, AppError> {
    let expiration = (chrono::Utc::now() + chrono::Duration::minutes(TOKEN_TTL_MINUTES))
        .timestamp() as usize;

    let claims = Claims {
        user_id,
        email: email.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal("Failed to generate token", e))
}

/// Verifies a token's signature and expiry, returning its claims.
///
/// Malformed, forged, and expired tokens all fail identically (via the
/// `From<jsonwebtoken::errors::Error>` conversion), so a caller cannot use
/// the rejection to distinguish one from another.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
