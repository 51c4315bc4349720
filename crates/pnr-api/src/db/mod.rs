//! # Database Persistence Layer
//!
//! Postgres persistence for the catalog via SQLx.
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, every
//! catalog write is persisted before it is published to the in-memory
//! stores, and the stores are hydrated from the database on startup. When
//! absent, the API runs in in-memory-only mode (development and tests).
//!
//! Each module owns one table (the lattice module owns two) and exposes
//! plain `async fn`s over `&PgPool`.

pub mod branches;
pub mod lattice;
pub mod materials;
pub mod regulations;
pub mod sub_branches;
pub mod subjects;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if no URL is configured (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(database_url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!(
                "DATABASE_URL not set: running in-memory only mode. \
                 State will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
