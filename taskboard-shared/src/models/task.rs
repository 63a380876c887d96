/// Task model
///
/// A task is a titled to-do item that can be marked completed. Tasks are not
/// owned by users.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     priority VARCHAR(20) NOT NULL DEFAULT 'medium',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::db::schema::EntitySchema;
use crate::models::timestamps::Timestamps;
use uuid::Uuid;

/// Priority assigned when a task is created without one
pub const DEFAULT_PRIORITY: &str = "medium";

/// Persisted task
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4), generated on creation
    pub id: Uuid,

    /// Short title, 1-255 characters
    pub title: String,

    /// Optional longer description, at most 1000 characters
    pub description: Option<String>,

    /// Whether the task is done
    pub completed: bool,

    /// Free-form priority label, 1-20 characters
    pub priority: String,

    /// Store-managed timestamps
    #[sqlx(flatten)]
    pub timestamps: Timestamps,
}

impl Task {
    /// Table and index DDL, registered in [`crate::db::schema::REGISTRY`]
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "Task",
        table: "tasks",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id UUID PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                description TEXT,
                completed BOOLEAN NOT NULL DEFAULT FALSE,
                priority VARCHAR(20) NOT NULL DEFAULT 'medium',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            "CREATE INDEX IF NOT EXISTS ix_tasks_completed ON tasks (completed)",
            "CREATE INDEX IF NOT EXISTS ix_tasks_created_at ON tasks (created_at)",
        ],
    };
}

/// Input for creating a task
///
/// Values are expected to be validated already; the repository stores them as given.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
}

impl NewTask {
    /// An open task with the default priority and no description
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

/// Partial update of a task
///
/// Only `Some` fields are written; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

impl TaskChanges {
    /// Changes that only set the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }

    /// Applies the changes to an in-memory task
    ///
    /// Does not touch the timestamps; the caller owns that.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Buy milk".to_string(),
            description: Some("Two litres".to_string()),
            completed: false,
            priority: DEFAULT_PRIORITY.to_string(),
            timestamps: Timestamps::now(),
        }
    }

    #[test]
    fn test_new_task_defaults() {
        let task = NewTask::titled("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, "medium");
        assert!(!task.completed);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_empty_changes_leave_task_untouched() {
        let mut task = sample_task();
        let before = task.clone();

        let changes = TaskChanges::default();
        assert!(changes.is_empty());
        changes.apply_to(&mut task);

        assert_eq!(task, before);
    }

    #[test]
    fn test_partial_changes_only_touch_set_fields() {
        let mut task = sample_task();

        TaskChanges {
            priority: Some("high".to_string()),
            ..Default::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.priority, "high");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description.as_deref(), Some("Two litres"));
        assert!(!task.completed);
    }

    #[test]
    fn test_completion_changes() {
        let changes = TaskChanges::completion(true);
        assert_eq!(changes.completed, Some(true));
        assert!(changes.title.is_none());
        assert!(!changes.is_empty());
    }
}
