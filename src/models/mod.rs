pub mod task;
pub mod user;

pub use task::{Task, TaskCreateRequest, TaskUpdateRequest};
pub use user::{User, UserCredentials};
