//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management so every failure a handler can
//! hit — validation, authentication, ownership misses, duplicate emails,
//! database or hashing trouble — maps to one consistent JSON response shape.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses. `From` implementations for
//! `sqlx::Error`, `jsonwebtoken::errors::Error`, `bcrypt::BcryptError`, and
//! `validator::ValidationErrors` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A required field is missing or malformed (HTTP 400).
    Validation(String),
    /// Authentication is missing, invalid, or expired (HTTP 401).
    Unauthorized(String),
    /// The requested resource does not exist for the calling user (HTTP 404).
    ///
    /// Also used when a resource exists but belongs to another user, so that
    /// cross-user probing cannot distinguish "not yours" from "not there".
    NotFound(String),
    /// A uniqueness constraint was violated, e.g. duplicate email (HTTP 409).
    Conflict(String),
    /// An unexpected server-side failure: database, hashing, signing (HTTP 500).
    /// `context` describes the operation that failed; `details` carries the
    /// underlying error message.
    Internal { context: String, details: String },
}

impl AppError {
    /// Wraps an underlying error with a handler-level context message.
    pub fn internal(context: impl Into<String>, err: impl fmt::Display) -> Self {
        AppError::Internal {
            context: context.into(),
            details: err.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal { context, details } => {
                write!(f, "Internal Server Error: {}: {}", context, details)
            }
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Every error body is JSON with a human-readable `error` field; internal
/// errors additionally expose a `details` field with the underlying message.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::Internal { context, details } => {
                HttpResponse::InternalServerError().json(json!({
                    "error": context,
                    "details": details
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; unique-index violations map to
/// `Conflict` so the duplicate-registration race still surfaces as 409 even
/// when the application-level existence check loses it; everything else is an
/// internal error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        if matches!(error, sqlx::Error::RowNotFound) {
            return AppError::NotFound("Record not found".into());
        }
        if let sqlx::Error::Database(db_err) = &error {
            if db_err.is_unique_violation() {
                return AppError::Conflict("User already exists.".into());
            }
        }
        AppError::internal("Database operation failed", error)
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// The underlying reason (malformed, forged, expired) is deliberately not
/// echoed: every token failure reads the same to the client.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized("Invalid or expired token".into())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::internal("Password hashing failed", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Validation("Email and password are required.".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::Unauthorized("Invalid or expired token".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        let error = AppError::NotFound("Task not found for this user.".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        let error = AppError::Conflict("User already exists.".into());
        let response = error.error_response();
        assert_eq!(response.status(), 409);

        let error = AppError::internal("Database operation failed", "connection reset");
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_token_errors_are_uniform() {
        // Expired and malformed token errors must collapse to the same message.
        let malformed = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::InvalidToken,
        );
        let expired = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::ExpiredSignature,
        );

        let a = AppError::from(malformed);
        let b = AppError::from(expired);

        match (&a, &b) {
            (AppError::Unauthorized(m1), AppError::Unauthorized(m2)) => assert_eq!(m1, m2),
            _ => panic!("token errors must map to Unauthorized"),
        }
    }
}
