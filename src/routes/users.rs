use crate::{
    auth::{
        generate_token, hash_password, verify_password, LoginRequest, LoginResponse,
        RegisterRequest, RegisterResponse,
    },
    config::Config,
    error::AppError,
    models::UserCredentials,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account from an email and password. The password is
/// bcrypt-hashed before anything touches the store; the plaintext is never
/// persisted. Duplicate emails are rejected with 409 — the application-level
/// existence check runs before hashing to avoid wasted work, and the unique
/// index on `users.email` closes the concurrent-registration race.
#[post("/registerUser")]
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = match (&payload.email, &payload.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e.clone(), p.clone()),
        _ => {
            return Err(AppError::Validation(
                "Email and password are required.".into(),
            ))
        }
    };
    payload.validate()?;

    // Check if the email is already taken
    let existing_user = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&**pool)
        .await?;

    if existing_user.is_some() {
        return Err(AppError::Conflict("User already exists.".into()));
    }

    let password_hash = hash_password(&password)?;

    let user_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".into(),
        user_id,
    }))
}

/// Login user
///
/// Verifies credentials and returns a 30-minute bearer token carrying the
/// user's id and email. Unknown email and wrong password produce the same
/// response so the endpoint cannot be used to enumerate accounts. No store
/// writes happen here.
#[post("/loginUser")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = match (&payload.email, &payload.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e.clone(), p.clone()),
        _ => {
            return Err(AppError::Validation(
                "Email and password are required.".into(),
            ))
        }
    };

    let user = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, email, password_hash FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?;

    let Some(user) = user else {
        return Err(AppError::Unauthorized("Invalid email or password.".into()));
    };

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid email or password.".into()));
    }

    let token = generate_token(user.id, &user.email, &config.jwt_secret)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".into(),
        token,
    }))
}
