/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `schema`: explicit registry of entity schemas and the schema-creation step
/// - `error`: typed persistence errors shared by every repository
///
/// Models live in the `models` module at crate root level.

pub mod error;
pub mod pool;
pub mod schema;
