/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Welcome message and health check
/// - `tasks`: Task CRUD and completion endpoints
/// - `auth`: Signup, signin and signout

pub mod auth;
pub mod health;
pub mod tasks;
