use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
///
/// There is intentionally no `owner` field: ownership always comes from the
/// authenticated caller, and an `owner` key in the request body is dropped by serde.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The name of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Free-form description, at most 1000 characters.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Fields a client may change on an existing task. The owner is not one of them.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Represents a task entity as stored in the registry and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// Identifier of the user who owns the task. Set once at creation.
    pub owner: Uuid,
    pub name: String,
    pub description: String,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` owned by `owner` from client input.
    pub fn new(input: TaskInput, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            name: input.name,
            description: input.description,
            created_at: Utc::now(),
        }
    }
}
