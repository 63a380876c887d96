//! Typed persistence errors
//!
//! Every repository reports failures as a [`StoreError`], classified once at
//! the persistence boundary. Request handlers dispatch on the variant instead
//! of inspecting error text: transient failures become `503`, everything else
//! keeps its own status.
//!
//! # Classification
//!
//! | sqlx error                                   | Variant      |
//! |----------------------------------------------|--------------|
//! | `Io`, `Tls`, `PoolTimedOut`, `PoolClosed`, `WorkerCrashed` | `Transient` |
//! | database error, SQLSTATE class `08`, `53300`, `57P01`..`57P03` | `Transient` |
//! | database error, SQLSTATE `23505` (unique violation) | `Conflict` |
//! | `RowNotFound`                                | `NotFound`   |
//! | anything else                                | `Persistent` |

/// Result alias used by every repository operation
pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached; the caller may retry later
    #[error("store unavailable: {0}")]
    Transient(String),

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// A row that had to exist was missing
    #[error("record not found")]
    NotFound,

    /// Any other persistence failure
    #[error("store error: {0}")]
    Persistent(String),
}

impl StoreError {
    /// Whether the failure is assumed to be retryable by the caller
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transient(_))
    }
}

/// SQLSTATE codes that indicate the server or the connection went away
fn is_connectivity_code(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "53300" | "57P01" | "57P02" | "57P03")
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Transient(err.to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                    return StoreError::Conflict(constraint);
                }

                match db_err.code() {
                    Some(code) if is_connectivity_code(&code) => {
                        StoreError::Transient(db_err.to_string())
                    }
                    _ => StoreError::Persistent(db_err.to_string()),
                }
            }
            other => StoreError::Persistent(other.to_string()),
        }
    }
}
