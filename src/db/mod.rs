//! Database module
//!
//! Connection pooling, migrations, and the storage repositories.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::{create_pool, test_connection};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
