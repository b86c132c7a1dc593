use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskCreateRequest, TaskUpdateRequest},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// The owner on every query below comes from the verified token claims via
/// `AuthenticatedUser`, never from a client-supplied parameter. A task that
/// exists but belongs to someone else is therefore indistinguishable from a
/// task that does not exist: both are 404.
const TASK_NOT_FOUND: &str = "Task not found for this user.";

/// Maps an unparsable task id to the same 404 as a missing task, so malformed
/// ids leak nothing either.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(TASK_NOT_FOUND.into()))
}

/// Creates a new task for the authenticated user.
///
/// The title is required and must be non-blank after trimming; it is stored
/// trimmed. `dueDate` is optional and `completed` defaults to false. The
/// user row behind the token is re-checked here: a token may outlive its
/// account, in which case creation fails with 404.
///
/// ## Responses:
/// - `201 Created`: the newly created task.
/// - `400 Bad Request`: missing or blank title.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: the token's user no longer exists.
/// - `500 Internal Server Error`: store failure.
#[post("/createTask")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    payload: web::Json<TaskCreateRequest>,
) -> Result<impl Responder, AppError> {
    let title = payload.title.as_deref().map(str::trim).unwrap_or("");
    if title.is_empty() {
        return Err(AppError::Validation(
            "Title is required for creating the task.".into(),
        ));
    }

    let user_exists = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE id = $1")
        .bind(user.user_id)
        .fetch_optional(&**pool)
        .await?;
    if user_exists.is_none() {
        return Err(AppError::NotFound("User not found.".into()));
    }

    let task = Task::new(
        title.to_string(),
        payload.due_date,
        payload.completed,
        user.user_id,
    );

    let created = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, due_date, completed, user_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, title, due_date, completed, user_id",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(task.due_date)
    .bind(task.completed)
    .bind(task.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// Retrieves all tasks owned by the authenticated user.
///
/// Rows come back in store-native order; no ordering is promised to callers.
///
/// ## Responses:
/// - `200 OK`: a JSON array of tasks (possibly empty).
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `500 Internal Server Error`: store failure.
#[get("/tasks")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, due_date, completed, user_id FROM tasks WHERE user_id = $1",
    )
    .bind(user.user_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a single task by id, scoped to the authenticated user.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this user (including malformed ids
///   and tasks owned by other users).
/// - `500 Internal Server Error`: store failure.
#[get("/task/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;

    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, due_date, completed, user_id FROM tasks WHERE id = $1 AND user_id = $2",
    )
    .bind(task_id)
    .bind(user.user_id)
    .fetch_optional(&**pool)
    .await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(TASK_NOT_FOUND.into())),
    }
}

/// Partially updates a task owned by the authenticated user.
///
/// Only the supplied fields change: an absent field is left untouched, an
/// explicit `"dueDate": null` clears the date, and explicit `false` or empty
/// string values are applied as given. The title is trimmed when present.
/// An update supplying none of the three fields is rejected, not silently
/// accepted.
///
/// ## Responses:
/// - `200 OK`: `{"message": ..., "task": <updated task>}`.
/// - `400 Bad Request`: no recognized field supplied.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this user.
/// - `500 Internal Server Error`: store failure.
#[put("/task/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TaskUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;

    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, due_date, completed, user_id FROM tasks WHERE id = $1 AND user_id = $2",
    )
    .bind(task_id)
    .bind(user.user_id)
    .fetch_optional(&**pool)
    .await?;

    let Some(mut task) = task else {
        return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
    };

    if payload.is_empty() {
        return Err(AppError::Validation(
            "At least one field (title, dueDate, completed) must be provided to make the update."
                .into(),
        ));
    }

    if let Some(title) = &payload.title {
        task.title = title.trim().to_string();
    }
    if let Some(due_date) = payload.due_date {
        task.due_date = due_date;
    }
    if let Some(completed) = payload.completed {
        task.completed = completed;
    }

    let updated = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET title = $1, due_date = $2, completed = $3
         WHERE id = $4 AND user_id = $5
         RETURNING id, title, due_date, completed, user_id",
    )
    .bind(&task.title)
    .bind(task.due_date)
    .bind(task.completed)
    .bind(task_id)
    .bind(user.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated successfully",
        "task": updated
    })))
}

/// Deletes a task owned by the authenticated user.
///
/// Returns a confirmation message, not the deleted entity.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Task deleted successfully."}`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task for this user.
/// - `500 Internal Server Error`: store failure.
#[delete("/task/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user.user_id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(TASK_NOT_FOUND.into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted successfully."
    })))
}

#[cfg(test)]
mod tests {
    use super::parse_task_id;
    use crate::error::AppError;

    #[test]
    fn test_malformed_task_id_reads_as_not_found() {
        match parse_task_id("definitely-not-a-uuid") {
            Err(AppError::NotFound(msg)) => {
                assert_eq!(msg, "Task not found for this user.");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_well_formed_task_id_parses() {
        assert!(parse_task_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
    }
}
