//! # DZ Skills DB
//!
//! PostgreSQL pool initialization and schema migrations.
//!
//! ```ignore
//! use dzskills_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await;
//! run_migrations(&pool).await?;
//! ```

use std::env;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// `DB_MAX_CONNECTIONS` overrides the pool size (default 10).
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the database is unreachable. This
/// only runs once at startup, where there is nothing useful to fall back to.
pub async fn init_db_pool() -> sqlx::PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections = env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
