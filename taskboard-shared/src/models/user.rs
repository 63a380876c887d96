/// User model
///
/// Users sign up with an email, a username and a password. Only an Argon2id
/// hash of the password is ever stored.
///
/// `User` deliberately has no `Serialize` impl, and its `Debug` output
/// redacts the hash: response shapes are built field by field in the API layer.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     username VARCHAR(50) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::db::schema::EntitySchema;
use crate::models::timestamps::Timestamps;
use std::fmt;
use uuid::Uuid;

/// Persisted user account
#[derive(Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4), generated on creation
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Username, unique across all users, 3-50 characters
    pub username: String,

    /// Argon2id password hash in PHC string format
    pub password_hash: String,

    /// Deactivated accounts cannot sign in
    pub is_active: bool,

    /// Store-managed timestamps
    #[sqlx(flatten)]
    pub timestamps: Timestamps,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("is_active", &self.is_active)
            .field("timestamps", &self.timestamps)
            .finish()
    }
}

impl User {
    /// Table and index DDL, registered in [`crate::db::schema::REGISTRY`]
    pub const SCHEMA: EntitySchema = EntitySchema {
        entity: "User",
        table: "users",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                email VARCHAR(255) NOT NULL UNIQUE,
                username VARCHAR(50) NOT NULL UNIQUE,
                password_hash VARCHAR(255) NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            "CREATE INDEX IF NOT EXISTS ix_users_email ON users (email)",
            "CREATE INDEX IF NOT EXISTS ix_users_username ON users (username)",
            "CREATE INDEX IF NOT EXISTS ix_users_is_active ON users (is_active)",
        ],
    };
}

/// Canonical form of an email address: the domain part lowercased
///
/// The local part is kept as typed; only the domain is case-insensitive.
/// Every stored email and every email lookup goes through this.
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Signup data
///
/// Carries the raw password only until the repository has hashed it.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Partial update of a user
///
/// Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Applies the changes to an in-memory user
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}
