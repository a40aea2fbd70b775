//! Postgres-backed account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::model::{Account, NewAccount};
use super::store::{AccountStore, StoreError};

const ACCOUNT_COLUMNS: &str = "id, username, email, password, role, direccion, telefono, \
     failed_login_attempts, last_login_attempt, locked_at, is_active, last_login, \
     created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn lookup(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn lookup_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let result = sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO accounts (username, email, password, role, direccion, telefono) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password)
        .bind(new.role.as_str())
        .bind(&new.direccion)
        .bind(&new.telefono)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(account) => Ok(account),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::Duplicate)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn increment_failed_attempts(&self, username: &str) -> Result<Option<i32>, StoreError> {
        // One statement so the counter update holds the row lock; a naive
        // read-then-write would lose increments under concurrent attempts.
        let count = sqlx::query_scalar::<_, i32>(
            "UPDATE accounts \
             SET failed_login_attempts = failed_login_attempts + 1, \
                 last_login_attempt = $2, updated_at = $2 \
             WHERE username = $1 \
             RETURNING failed_login_attempts",
        )
        .bind(username)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(count)
    }

    async fn lock_account(&self, username: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE accounts SET is_active = FALSE, locked_at = $2, updated_at = $2 \
             WHERE username = $1",
        )
        .bind(username)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn unlock_account(&self, username: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE accounts \
             SET is_active = TRUE, locked_at = NULL, failed_login_attempts = 0, updated_at = $2 \
             WHERE username = $1",
        )
        .bind(username)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE accounts \
             SET last_login = $2, failed_login_attempts = 0, updated_at = $2 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
