/// Persistence models
///
/// # Models
///
/// - `task`: to-do items
/// - `user`: user accounts and signup/update inputs
/// - `timestamps`: the `created_at` / `updated_at` pair every entity embeds
///
/// Each model publishes its DDL as a `SCHEMA` constant; see
/// [`crate::db::schema::REGISTRY`].

pub mod task;
pub mod timestamps;
pub mod user;
