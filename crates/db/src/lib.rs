//! Store implementations for the Crewline backend.
//!
//! - [`PgStore`]: Postgres via sqlx, the production backend. Transition
//!   guards are single conditional UPDATE statements; the active-time-entry
//!   invariant is a partial unique index.
//! - [`MemStore`]: in-process maps behind a `tokio::sync::RwLock`, with the
//!   same conditional-update semantics evaluated under the write lock.
//!   Used by the test suites and for DB-less development.

use sqlx::postgres::PgPoolOptions;

pub mod mem;
mod models;
pub mod pg;

pub use mem::MemStore;
pub use pg::PgStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
