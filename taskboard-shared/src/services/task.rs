use crate::db::error::StoreResult;
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::repositories::task::TaskRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Task as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            priority: task.priority,
            created_at: task.timestamps.created_at,
            updated_at: task.timestamps.updated_at,
        }
    }
}

/// Service layer for tasks
///
/// Performs no validation of its own; inputs arrive validated from the
/// request extractors.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Create a new task
    #[instrument(skip(self, data), fields(task_title = %data.title))]
    pub async fn create_task(&self, data: NewTask) -> StoreResult<TaskResponse> {
        let task = self.repository.create(data).await?;
        Ok(task.into())
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: Uuid) -> StoreResult<Option<TaskResponse>> {
        Ok(self.repository.get_by_id(id).await?.map(TaskResponse::from))
    }

    /// List all tasks, newest first
    #[instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> StoreResult<Vec<TaskResponse>> {
        let tasks = self.repository.get_all().await?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    /// Apply a partial update, `None` if the task doesn't exist
    #[instrument(skip(self, changes), fields(task_id = %id))]
    pub async fn update_task(
        &self,
        id: Uuid,
        changes: TaskChanges,
    ) -> StoreResult<Option<TaskResponse>> {
        Ok(self
            .repository
            .update(id, changes)
            .await?
            .map(TaskResponse::from))
    }

    /// Delete a task, returning whether it existed
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        self.repository.delete(id).await
    }
}
