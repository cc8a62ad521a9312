use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RegistryError, TaskRegistry};
use crate::models::{Task, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    tasks: HashMap<Uuid, Task>,
}

/// Lock-guarded in-memory registry.
///
/// Used by the test suite and for running without a database. Each operation holds
/// the lock for its whole read-check-write sequence, so the email uniqueness check
/// and the insert in `create_user` are atomic.
#[derive(Default)]
pub struct MemoryRegistry {
    tables: RwLock<Tables>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl TaskRegistry for MemoryRegistry {
    async fn create_user(&self, user: &User) -> Result<(), RegistryError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RegistryError::Duplicate);
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RegistryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, RegistryError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RegistryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn create_task(&self, task: &Task) -> Result<(), RegistryError> {
        self.tables.write().await.tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn find_task(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, RegistryError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).filter(|t| t.owner == owner).cloned())
    }

    async fn list_tasks(&self, owner: Uuid) -> Result<Vec<Task>, RegistryError> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Option<Task>, RegistryError> {
        let mut tables = self.tables.write().await;
        match tables.tasks.get_mut(&id) {
            Some(task) if task.owner == owner => {
                task.name = name.to_string();
                task.description = description.to_string();
                Ok(Some(task.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<bool, RegistryError> {
        let mut tables = self.tables.write().await;
        let owned = tables.tasks.get(&id).is_some_and(|t| t.owner == owner);
        if owned {
            tables.tasks.remove(&id);
        }
        Ok(owned)
    }
}
