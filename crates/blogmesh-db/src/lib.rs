//! # blogmesh DB
//!
//! PostgreSQL pool initialization shared by the store-backed services
//! (auth, blog, comment, profile). Each service points `DATABASE_URL` at its
//! own database.
//!
//! # Example
//!
//! ```ignore
//! use blogmesh_db::init_db_pool;
//!
//! let pool = init_db_pool().await?;
//! blogmesh_db::ping(&pool).await?;
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to the database named by `DATABASE_URL`.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is unset or the first connection cannot be
/// established.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    connect(&database_url).await
}

pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Round-trips a trivial query; used by readiness probes.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
