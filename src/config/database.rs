//! Database connection pool initialization.
//!
//! The account store rides a PostgreSQL pool configured through
//! `DATABASE_URL`.
//!
//! # Panics
//!
//! [`init_db_pool`] panics when `DATABASE_URL` is unset or unreachable;
//! it runs once at startup where failing fast is the right behavior.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is handed to the account
/// store through the application state.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
