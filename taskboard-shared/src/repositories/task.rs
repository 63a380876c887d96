/// Task persistence
///
/// [`TaskRepository`] is the data access interface the task service is built
/// on; [`PgTaskRepository`] implements it on PostgreSQL.
///
/// Every mutating operation acquires its own transaction, commits it on
/// success, and rolls it back on every other path (an uncommitted sqlx
/// transaction rolls back when dropped). Failures propagate as
/// [`StoreError`](crate::db::error::StoreError).
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::NewTask;
/// use taskboard_shared::repositories::task::{PgTaskRepository, TaskRepository};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let repo = PgTaskRepository::new(pool);
/// let task = repo.create(NewTask::titled("Buy milk")).await?;
/// assert!(repo.get_by_id(task.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

use crate::db::error::StoreResult;
use crate::models::task::{NewTask, Task, TaskChanges};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Data access interface for tasks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task and returns it with its generated ID and timestamps
    async fn create(&self, data: NewTask) -> StoreResult<Task>;

    /// Finds a task by ID
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Lists every task, newest first
    async fn get_all(&self) -> StoreResult<Vec<Task>>;

    /// Writes the `Some` fields of `changes`
    ///
    /// Returns `None` if no task has this ID.
    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>>;

    /// Deletes a task, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// PostgreSQL-backed [`TaskRepository`]
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, data: NewTask) -> StoreResult<Task> {
        let mut tx = self.pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, title, description, completed, priority)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, completed, priority, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed)
        .bind(data.priority)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, priority, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn get_all(&self) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, priority, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if changes.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if changes.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if changes.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }
        if changes.priority.is_some() {
            bind_count += 1;
            query.push_str(&format!(", priority = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, completed, priority, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = changes.title {
            q = q.bind(title);
        }
        if let Some(description) = changes.description {
            q = q.bind(description);
        }
        if let Some(completed) = changes.completed {
            q = q.bind(completed);
        }
        if let Some(priority) = changes.priority {
            q = q.bind(priority);
        }

        let mut tx = self.pool.begin().await?;
        let task = q.fetch_optional(&mut *tx).await?;
        tx.commit().await?;

        if task.is_some() {
            debug!(task_id = %id, "Updated task");
        }
        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(task_id = %id, "Deleted task");
        }
        Ok(deleted)
    }
}
