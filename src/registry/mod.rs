//! Persistence port for users and tasks.
//!
//! Services depend on [`TaskRegistry`] only; the PostgreSQL and in-memory adapters
//! are interchangeable behind `Arc<dyn TaskRegistry>`. Every task operation that can
//! touch an existing record takes the owner alongside the task id, so a query can
//! never reach another user's row.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{Task, User};

pub use memory::MemoryRegistry;
pub use postgres::PgRegistry;

/// Errors raised by registry adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A uniqueness rule (user email) was violated.
    Duplicate,
    /// The backing store could not complete the operation.
    Unavailable(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryError::Duplicate => write!(f, "record already exists"),
            RegistryError::Unavailable(msg) => write!(f, "registry unavailable: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// CRUD operations over user and task records.
#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Inserts a user. Fails with [`RegistryError::Duplicate`] if the email is taken.
    async fn create_user(&self, user: &User) -> Result<(), RegistryError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RegistryError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError>;

    async fn email_exists(&self, email: &str) -> Result<bool, RegistryError>;

    async fn create_task(&self, task: &Task) -> Result<(), RegistryError>;

    /// Returns the task only if it exists and is owned by `owner`.
    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, RegistryError>;

    /// All tasks owned by `owner`, newest first.
    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, RegistryError>;

    /// Replaces name and description of an owned task; `None` if no such owned task.
    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Option<Task>, RegistryError>;

    /// Deletes an owned task; `false` if no such owned task.
    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, RegistryError>;
}
