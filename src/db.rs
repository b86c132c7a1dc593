//! Database pool setup and idempotent schema bootstrap.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::AppError;

/// Connects to Postgres with a small fixed-size pool shared by all requests.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Creates the `users` and `tasks` tables if they do not exist yet.
///
/// The UNIQUE constraint on `users.email` is the store-level backstop for the
/// non-transactional check-then-insert in registration: under concurrent
/// duplicate registrations exactly one insert wins and the loser gets a
/// uniqueness violation (surfaced as 409).
pub async fn init_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
             id SERIAL PRIMARY KEY,
             email TEXT NOT NULL UNIQUE,
             password_hash TEXT NOT NULL,
             created_at TIMESTAMPTZ NOT NULL DEFAULT now()
         )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS tasks (
             id UUID PRIMARY KEY,
             title TEXT NOT NULL,
             due_date DATE,
             completed BOOLEAN NOT NULL DEFAULT FALSE,
             user_id INTEGER NOT NULL REFERENCES users(id)
         )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks (user_id)")
        .execute(pool)
        .await?;

    Ok(())
}
