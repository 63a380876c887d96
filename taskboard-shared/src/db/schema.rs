/// Explicit schema registry
///
/// Every persisted entity publishes an [`EntitySchema`] describing the DDL
/// that creates its table and indexes. [`REGISTRY`] lists all of them once;
/// bootstrap code hands that slice to [`create_schema`], so nothing relies on
/// a model being imported somewhere for its table to exist.
///
/// All statements are idempotent (`IF NOT EXISTS`), so running
/// [`create_schema`] on every startup is safe.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::pool::{create_pool, PoolConfig};
/// use taskboard_shared::db::schema::{create_schema, REGISTRY};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(PoolConfig::new(std::env::var("DATABASE_URL")?)).await?;
///
/// create_schema(&pool, REGISTRY).await?;
/// # Ok(())
/// # }
/// ```

use crate::models::{task::Task, user::User};
use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// DDL descriptor for one persisted entity
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Entity name, used for logging
    pub entity: &'static str,

    /// Table backing the entity
    pub table: &'static str,

    /// Statements creating the table and its indexes, in order
    pub statements: &'static [&'static str],
}

/// Every entity known to the application
pub static REGISTRY: &[EntitySchema] = &[Task::SCHEMA, User::SCHEMA];

/// Creates all tables and indexes described by `registry`
///
/// Runs inside a single transaction: either every entity's schema is in
/// place afterwards or nothing changed.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a statement fails
pub async fn create_schema(pool: &PgPool, registry: &[EntitySchema]) -> Result<(), sqlx::Error> {
    info!(entities = registry.len(), "Creating database schema");

    let mut tx = pool.begin().await?;

    for schema in registry {
        debug!(entity = schema.entity, table = schema.table, "Applying entity schema");
        for statement in schema.statements {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
    }

    tx.commit().await?;

    info!("Database schema is up to date");
    Ok(())
}

/// Creates the database if it doesn't exist
///
/// Useful for development and tests. In production the database should
/// already exist.
///
/// # Errors
///
/// Returns an error if the server is unreachable or the role may not create
/// databases
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        warn!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
        info!("Database created");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}
