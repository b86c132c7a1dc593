pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Payload for a new user registration request.
///
/// Both fields are optional at the type level so that a missing field produces
/// our own 400 response ("Email and password are required.") instead of a
/// deserialization error. The email format is additionally validated here;
/// login deliberately performs no such check so its failure responses cannot
/// leak whether an email was well-formed.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    #[validate(email)]
    pub email: Option<String>,
    /// Password for the new account.
    pub password: Option<String>,
}

/// Payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body after successful registration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    /// The store-assigned identifier of the new user.
    pub user_id: i32,
}

/// Response body after successful login. The token is the only credential the
/// client holds; nothing is persisted server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
