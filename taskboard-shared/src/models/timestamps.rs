/// Store-managed record timestamps
///
/// Every entity embeds a [`Timestamps`] value instead of repeating the two
/// columns. With sqlx's `#[sqlx(flatten)]` the fields are read straight from
/// the `created_at` / `updated_at` columns of the entity's row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation and last-modification times of a persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Timestamps {
    /// Set once by the store on insert
    pub created_at: DateTime<Utc>,

    /// Set by the store on insert and on every update
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    /// Timestamps for a record inserted right now
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the record as modified right now
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
