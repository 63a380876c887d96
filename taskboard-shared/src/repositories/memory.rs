/// In-memory repositories
///
/// Process-local implementations of [`TaskRepository`] and [`UserRepository`]
/// with the same observable behaviour as the PostgreSQL ones: generated IDs,
/// store-managed timestamps, newest-first listing, unique email and username.
/// They back the HTTP integration tests and can run the API without a database.
///
/// [`MemoryTaskRepository::fail_next`] and [`MemoryUserRepository::fail_next`]
/// make the next operation fail with a chosen [`StoreError`], which is how the
/// tests reach the `503`/`500` paths.

use crate::auth::password;
use crate::db::error::{StoreError, StoreResult};
use crate::models::task::{NewTask, Task, TaskChanges};
use crate::models::timestamps::Timestamps;
use crate::models::user::{NewUser, User, UserChanges};
use crate::repositories::task::TaskRepository;
use crate::repositories::user::{find_duplicate, UserRepository};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Rows plus a pending injected failure
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    fail_next: Option<StoreError>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            fail_next: None,
        }
    }
}

impl<T> Table<T> {
    /// Consumes the injected failure, if any
    fn check(&mut self) -> StoreResult<()> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> MutexGuard<'_, Table<T>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`TaskRepository`]
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    table: Mutex<Table<Task>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next repository call fail with `err`
    pub fn fail_next(&self, err: StoreError) {
        lock(&self.table).fail_next = Some(err);
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn create(&self, data: NewTask) -> StoreResult<Task> {
        let mut table = lock(&self.table);
        table.check()?;

        let task = Task {
            id: Uuid::new_v4(),
            title: data.title,
            description: data.description,
            completed: data.completed,
            priority: data.priority,
            timestamps: Timestamps::now(),
        };
        table.rows.push(task.clone());

        info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let mut table = lock(&self.table);
        table.check()?;

        Ok(table.rows.iter().find(|t| t.id == id).cloned())
    }

    async fn get_all(&self) -> StoreResult<Vec<Task>> {
        let mut table = lock(&self.table);
        table.check()?;

        // Reverse insertion order first so equal timestamps still list newest first
        let mut tasks: Vec<Task> = table.rows.iter().rev().cloned().collect();
        tasks.sort_by(|a, b| b.timestamps.created_at.cmp(&a.timestamps.created_at));
        Ok(tasks)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut table = lock(&self.table);
        table.check()?;

        let Some(task) = table.rows.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if !changes.is_empty() {
            changes.apply_to(task);
            task.timestamps.touch();
        }
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut table = lock(&self.table);
        table.check()?;

        let before = table.rows.len();
        table.rows.retain(|t| t.id != id);
        Ok(table.rows.len() < before)
    }
}

/// In-memory [`UserRepository`]
///
/// Uniqueness is re-checked under the table lock at insert time, playing the
/// role of the database's unique constraints.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    table: Mutex<Table<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next repository call fail with `err`
    pub fn fail_next(&self, err: StoreError) {
        lock(&self.table).fail_next = Some(err);
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored users with this email
    pub fn count_by_email(&self, email: &str) -> usize {
        lock(&self.table)
            .rows
            .iter()
            .filter(|u| u.email == email)
            .count()
    }

    fn insert(&self, user: User) -> StoreResult<User> {
        let mut table = lock(&self.table);
        table.check()?;

        if table.rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("users_email_key".to_string()));
        }
        if table.rows.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("users_username_key".to_string()));
        }

        table.rows.push(user.clone());
        Ok(user)
    }

    /// Hashes and inserts a user that already passed the duplicate pre-check
    async fn store(&self, data: NewUser) -> Option<User> {
        let password_hash = match password::spawn_hash(data.password).await {
            Ok(hash) => hash,
            Err(err) => {
                error!(error = %err, "Password hashing failed during user creation");
                return None;
            }
        };

        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            username: data.username,
            password_hash,
            is_active: true,
            timestamps: Timestamps::now(),
        };

        match self.insert(user) {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "Created new user");
                Some(user)
            }
            Err(StoreError::Conflict(constraint)) => {
                warn!(constraint = %constraint, "Integrity error during user creation");
                None
            }
            Err(err) => {
                error!(error = %err, "Unexpected error during user creation");
                None
            }
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let mut table = lock(&self.table);
        table.check()?;

        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let mut table = lock(&self.table);
        table.check()?;

        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut table = lock(&self.table);
        table.check()?;

        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, data: NewUser) -> Option<User> {
        match find_duplicate(self, &data).await {
            Ok(Some(_)) => None,
            Ok(None) => self.store(data).await,
            Err(err) => {
                error!(email = %data.email, error = %err, "Unexpected error during user creation");
                None
            }
        }
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut table = lock(&self.table);
        table.check()?;

        if !table.rows.iter().any(|u| u.id == id) {
            return Ok(None);
        }

        let conflict = table.rows.iter().filter(|u| u.id != id).find_map(|u| {
            if changes.email.as_deref() == Some(u.email.as_str()) {
                Some("users_email_key")
            } else if changes.username.as_deref() == Some(u.username.as_str()) {
                Some("users_username_key")
            } else {
                None
            }
        });
        if let Some(constraint) = conflict {
            return Err(StoreError::Conflict(constraint.to_string()));
        }

        let Some(user) = table.rows.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if changes != UserChanges::default() {
            changes.apply_to(user);
            user.timestamps.touch();
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut table = lock(&self.table);
        table.check()?;

        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        Ok(table.rows.len() < before)
    }
}
