use crate::db::error::StoreResult;
use crate::models::user::{normalize_email, NewUser, User, UserChanges};
use crate::repositories::user::UserRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Service layer for user accounts
///
/// Delegates to the repository after normalizing emails with
/// [`normalize_email`], so addresses differing only in domain case are one
/// account. Returns `User` entities; callers choose which fields leave the
/// process.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Create a user, `None` if the email or username is taken or the insert failed
    #[instrument(skip(self, data), fields(email = %data.email))]
    pub async fn create_user(&self, mut data: NewUser) -> Option<User> {
        data.email = normalize_email(&data.email);
        self.repository.create(data).await
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.repository.get_by_email(&normalize_email(email)).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.repository.get_by_username(username).await
    }

    #[instrument(skip(self, changes), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, mut changes: UserChanges) -> StoreResult<Option<User>> {
        changes.email = changes.email.as_deref().map(normalize_email);
        self.repository.update(id, changes).await
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        self.repository.delete(id).await
    }

    /// Check credentials, returning the account on a match
    #[instrument(skip(self, password))]
    pub async fn authenticate_user(&self, email: &str, password: &str) -> StoreResult<Option<User>> {
        self.repository
            .authenticate(&normalize_email(email), password)
            .await
    }
}
