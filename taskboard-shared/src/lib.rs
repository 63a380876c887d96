//! # Taskboard Shared Library
//!
//! Persistence and business logic behind the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `models`: persisted entities and their input types
//! - `db`: connection pool, schema registry, typed store errors
//! - `auth`: password hashing
//! - `repositories`: data access traits with PostgreSQL and in-memory implementations
//! - `services`: entity-to-response translation on top of the repositories

pub mod auth;
pub mod db;
pub mod models;
pub mod repositories;
pub mod services;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
