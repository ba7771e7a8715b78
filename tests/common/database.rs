//! Database test fixtures
//!
//! The PostgreSQL tests run only when `DATABASE_URL` points at a scratch
//! database. Every fixture call truncates the `forms` table.

#![cfg(feature = "ssr")]

use sqlx::PgPool;

/// Connect to `DATABASE_URL`, or `None` when it is unset
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to create test database pool");
    Some(pool)
}

/// Run database migrations for testing
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Remove every stored form while keeping the schema
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE forms").execute(pool).await?;
    Ok(())
}

/// A migrated, empty database, or `None` when `DATABASE_URL` is unset
pub async fn test_database() -> Option<PgPool> {
    let Some(pool) = create_test_pool().await else {
        eprintln!("DATABASE_URL is not set; skipping PostgreSQL test");
        return None;
    };
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    cleanup_test_data(&pool)
        .await
        .expect("Failed to clean up test data");
    Some(pool)
}
