use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A task entity as stored in the database and returned by the API.
///
/// `user_id` is the owning user and is immutable after creation; every query
/// touching tasks filters on it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4, assigned at creation).
    pub id: Uuid,
    /// The title of the task, stored trimmed.
    pub title: String,
    /// Optional calendar due date.
    pub due_date: Option<NaiveDate>,
    /// Whether the task is done. Defaults to false.
    pub completed: bool,
    /// Identifier of the owning user.
    pub user_id: i32,
}

/// Input structure for creating a task.
///
/// `title` is optional at the type level so its absence yields our own 400
/// rather than a deserialization error; the handler enforces presence and
/// non-blankness after trimming.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

/// Input structure for a partial task update.
///
/// Absent fields leave the stored value untouched. `due_date` distinguishes
/// "absent" (outer `None`) from an explicit JSON `null` (inner `None`, which
/// clears the date), so the two outcomes the client can express survive
/// deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
}

impl TaskUpdateRequest {
    /// True when no recognized field was supplied; such an update is rejected
    /// rather than silently accepted.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.due_date.is_none() && self.completed.is_none()
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl Task {
    /// Builds a new task owned by `user_id`, with a fresh UUID and `completed`
    /// defaulting to false. `title` is expected to be trimmed by the caller.
    pub fn new(
        title: String,
        due_date: Option<NaiveDate>,
        completed: Option<bool>,
        user_id: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            due_date,
            completed: completed.unwrap_or(false),
            user_id,
        }
    }
}
