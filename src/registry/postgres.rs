use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RegistryError, TaskRegistry};
use crate::models::{Task, User};

const TASK_COLUMNS: &str = "id, owner, name, description, created_at";
const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";

/// Registry backed by PostgreSQL through a shared `sqlx` pool.
///
/// Email uniqueness is enforced by the `users_email_key` index; a violation surfaces as
/// [`RegistryError::Duplicate`] even when two signups race past the pre-check.
#[derive(Clone)]
pub struct PgRegistry {
    pool: PgPool,
}

impl PgRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, RegistryError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| RegistryError::Unavailable(format!("migration failed: {}", e)))?;
        Ok(Self::new(pool))
    }
}

/// Unique violations become `Duplicate`; everything else is an unavailable store.
impl From<sqlx::Error> for RegistryError {
    fn from(error: sqlx::Error) -> RegistryError {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                RegistryError::Duplicate
            }
            _ => RegistryError::Unavailable(error.to_string()),
        }
    }
}

#[async_trait]
impl TaskRegistry for PgRegistry {
    async fn create_user(&self, user: &User) -> Result<(), RegistryError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RegistryError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists.0)
    }

    async fn create_task(&self, task: &Task) -> Result<(), RegistryError> {
        sqlx::query(
            "INSERT INTO tasks (id, owner, name, description, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(task.id)
        .bind(task.owner)
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, RegistryError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND owner = $2",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, RegistryError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE owner = $1 ORDER BY created_at DESC",
            TASK_COLUMNS
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Option<Task>, RegistryError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET name = $1, description = $2
             WHERE id = $3 AND owner = $4
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(name)
        .bind(description)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, RegistryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
