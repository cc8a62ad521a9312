use crate::{
    auth::{AuthenticatedUser, OwnershipGuard},
    error::AppError,
    models::{TaskInput, TaskUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Creates a new task for the authenticated user.
///
/// The task's `owner` is always the caller; an `owner` key in the body is ignored.
///
/// ## Request Body:
/// - `name`: required, 1 to 200 characters.
/// - `description` (optional): up to 1000 characters.
///
/// ## Responses:
/// - `201 Created`: `{ message, data: task }`.
/// - `401 Unauthorized`: missing, malformed or invalid bearer token.
/// - `422 Unprocessable Entity`: input validation failed.
#[post("/createTask")]
pub async fn create_task(
    guard: web::Data<OwnershipGuard>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task = guard.create_task(user.0, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "successfully created task",
        "data": task,
    })))
}

/// Lists the caller's tasks, newest first.
#[get("/getTasks")]
pub async fn get_tasks(
    guard: web::Data<OwnershipGuard>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = guard.list_owned(user.0).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "success",
        "data": tasks,
    })))
}

/// Retrieves one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{ message, data: task }`.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[get("/getTask/{id}")]
pub async fn get_task(
    guard: web::Data<OwnershipGuard>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = guard.get_owned(user.0, task_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "success",
        "data": task,
    })))
}

/// Renames or re-describes one of the caller's tasks. The owner cannot change.
///
/// ## Responses:
/// - `200 OK`: `{ message }`.
/// - `404 Not Found`: no such task, or it belongs to someone else.
/// - `422 Unprocessable Entity`: input validation failed.
#[patch("/updateTask/{id}")]
pub async fn update_task(
    guard: web::Data<OwnershipGuard>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    guard
        .update_owned(user.0, task_id.into_inner(), task_data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Task updated" })))
}

/// Deletes one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{ message }`.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[delete("/deleteTask/{id}")]
pub async fn delete_task(
    guard: web::Data<OwnershipGuard>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    guard
        .authorize_delete(user.0, task_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}
