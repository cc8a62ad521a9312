//! Caller identity and task ownership.
//!
//! [`authenticate`] resolves the `Authorization` header to a user id, and
//! [`OwnershipGuard`] runs every task operation scoped to that id. There is no
//! unscoped path to a task: reads, updates and deletes all filter on the owner, and
//! creation stamps it.

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskUpdate};
use crate::registry::TaskRegistry;

const BEARER_SCHEME: &str = "Bearer";

/// Pulls the token text out of an `Authorization` header value.
///
/// The value must be `Bearer <token>`; the scheme is matched case-insensitively.
pub fn extract_bearer(value: &str) -> Result<&str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::MissingCredential);
    }
    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(AppError::MalformedCredential),
    }
}

/// Resolves the caller's user id from request headers.
///
/// Missing or empty header → `MissingCredential`; no token segment (or a non-bearer
/// scheme) → `MalformedCredential`; anything the token service rejects →
/// `InvalidCredential`.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<Uuid, AppError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| AppError::MalformedCredential)?,
        None => return Err(AppError::MissingCredential),
    };
    let token = extract_bearer(value)?;
    tokens.verify(token)
}

/// Task operations bound to an authenticated owner.
#[derive(Clone)]
pub struct OwnershipGuard {
    registry: Arc<dyn TaskRegistry>,
}

impl OwnershipGuard {
    pub fn new(registry: Arc<dyn TaskRegistry>) -> Self {
        Self { registry }
    }

    /// Persists a new task owned by `owner`, whatever the input claimed.
    pub async fn create_task(&self, owner: Uuid, input: TaskInput) -> Result<Task, AppError> {
        let task = Task::new(input, owner);
        self.registry.create_task(&task).await?;
        log::info!("task {} created for {}", task.id, owner);
        Ok(task)
    }

    pub async fn list_owned(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self.registry.list_tasks(owner).await?)
    }

    pub async fn get_owned(&self, owner: Uuid, task_id: Uuid) -> Result<Task, AppError> {
        self.registry
            .find_task(task_id, owner)
            .await?
            .ok_or(AppError::NotFoundOrForbidden)
    }

    /// Changes name and description of an owned task. The owner never changes.
    pub async fn update_owned(
        &self,
        owner: Uuid,
        task_id: Uuid,
        update: TaskUpdate,
    ) -> Result<Task, AppError> {
        self.registry
            .update_task(task_id, owner, &update.name, &update.description)
            .await?
            .ok_or(AppError::NotFoundOrForbidden)
    }

    /// Deletes an owned task. Absent and foreign tasks are indistinguishable.
    pub async fn authorize_delete(&self, owner: Uuid, task_id: Uuid) -> Result<(), AppError> {
        if self.registry.delete_task(task_id, owner).await? {
            log::info!("task {} deleted by {}", task_id, owner);
            Ok(())
        } else {
            Err(AppError::NotFoundOrForbidden)
        }
    }
}
