/// Data access layer
///
/// One trait per entity, each with a PostgreSQL implementation and an
/// in-memory one.
///
/// # Modules
///
/// - `task`: [`task::TaskRepository`] and [`task::PgTaskRepository`]
/// - `user`: [`user::UserRepository`] and [`user::PgUserRepository`]
/// - `memory`: process-local implementations of both traits

pub mod memory;
pub mod task;
pub mod user;
