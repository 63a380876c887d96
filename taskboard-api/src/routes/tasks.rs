/// Task endpoints
///
/// # Endpoints
///
/// - `POST   /api/v1/tasks` - Create a task
/// - `GET    /api/v1/tasks` - List tasks, newest first
/// - `GET    /api/v1/tasks/:id` - Get a task
/// - `PUT    /api/v1/tasks/:id` - Update any subset of fields
/// - `PATCH  /api/v1/tasks/:id/complete` - Flip the completion flag
/// - `PATCH  /api/v1/tasks/:id/completion-status` - Set the completion flag
/// - `DELETE /api/v1/tasks/:id` - Delete a task
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or the ID is not a UUID
/// - `404 Not Found`: No task with this ID
/// - `503 Service Unavailable`: The database could not be reached
/// - `500 Internal Server Error`: Any other store failure

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, UNAVAILABLE_MESSAGE},
    extract::{TaskIdPath, ValidatedJson},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskboard_shared::{
    models::task::{NewTask, TaskChanges, DEFAULT_PRIORITY},
    services::task::TaskResponse,
};
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default = "default_priority")]
    #[validate(length(min = 1, max = 20, message = "Priority must be 1-20 characters"))]
    pub priority: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

impl From<TaskCreate> for NewTask {
    fn from(req: TaskCreate) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
        }
    }
}

/// Update task request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub completed: Option<bool>,

    #[validate(length(min = 1, max = 20, message = "Priority must be 1-20 characters"))]
    pub priority: Option<String>,
}

impl From<TaskUpdate> for TaskChanges {
    fn from(req: TaskUpdate) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
        }
    }
}

/// Set completion request
#[derive(Debug, Deserialize)]
pub struct CompletionStatus {
    pub completed: Option<bool>,
}

fn task_not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Task with id {} not found", id))
}

/// Create a task
///
/// ```text
/// POST /api/v1/tasks
/// {"title": "Buy milk", "priority": "high"}
/// ```
///
/// Returns `201 Created` with the stored task. A store failure is reported
/// as `400 Failed to create task`.
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TaskCreate>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let task = state.tasks.create_task(req.into()).await.map_err(|err| {
        error!(error = %err, "Failed to create task");
        ApiError::BadRequest("Failed to create task".to_string())
    })?;

    info!(task_id = %task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// List all tasks, newest first
///
/// Any store failure is reported as `503`.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state.tasks.get_all_tasks().await.map_err(|err| {
        error!(error = %err, "Failed to list tasks");
        ApiError::ServiceUnavailable(UNAVAILABLE_MESSAGE.to_string())
    })?;

    Ok(Json(tasks))
}

/// Get a task by ID
pub async fn get_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .get_task(id)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch task"))?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Update any subset of a task's fields
pub async fn update_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
    ValidatedJson(req): ValidatedJson<TaskUpdate>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .update_task(id, req.into())
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to update task"))?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Flip a task's completion flag
pub async fn toggle_task_completion(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<Json<TaskResponse>> {
    let current = state
        .tasks
        .get_task(id)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch task"))?
        .ok_or_else(|| task_not_found(id))?;

    let task = state
        .tasks
        .update_task(id, TaskChanges::completion(!current.completed))
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to toggle task completion"))?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Set a task's completion flag
///
/// ```text
/// PATCH /api/v1/tasks/:id/completion-status
/// {"completed": true}
/// ```
///
/// The task must exist (`404`) before a missing `completed` field is reported (`400`).
pub async fn update_task_completion_status(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
    body: Option<Json<CompletionStatus>>,
) -> ApiResult<Json<TaskResponse>> {
    state
        .tasks
        .get_task(id)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch task"))?
        .ok_or_else(|| task_not_found(id))?;

    let completed = body
        .and_then(|Json(status)| status.completed)
        .ok_or_else(|| ApiError::BadRequest("Completed field is required".to_string()))?;

    let task = state
        .tasks
        .update_task(id, TaskChanges::completion(completed))
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to update task completion status"))?
        .ok_or_else(|| task_not_found(id))?;

    Ok(Json(task))
}

/// Delete a task
///
/// Returns `204 No Content`.
pub async fn delete_task(
    State(state): State<AppState>,
    TaskIdPath(id): TaskIdPath,
) -> ApiResult<StatusCode> {
    let deleted = state
        .tasks
        .delete_task(id)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to delete task"))?;

    if !deleted {
        return Err(task_not_found(id));
    }

    info!(task_id = %id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
