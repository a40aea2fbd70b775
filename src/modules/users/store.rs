//! Account store boundary.
//!
//! The authorization core never talks to Postgres directly; it goes through
//! [`AccountStore`], which the production [`PgAccountStore`] and the
//! test/development [`MemoryAccountStore`] implement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{Account, NewAccount};

/// Error type for account store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("username or email already registered")]
    Duplicate,
}

/// Persistence contract for portal accounts.
///
/// # Concurrency
///
/// `increment_failed_attempts` must be an atomic read-modify-write against
/// the persisted counter: simultaneous failed logins for the same username
/// (a credential-stuffing burst) must not lose increments, or lockout is
/// delayed. The Postgres backend relies on a single `UPDATE .. RETURNING`
/// holding the row lock; the in-memory backend increments under a write
/// lock.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Looks up an account by username.
    async fn lookup(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Looks up an account by id.
    async fn lookup_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Returns whether any account already uses this email.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Creates an account. Fails with [`StoreError::Duplicate`] when the
    /// username or email is taken.
    async fn create(&self, new: NewAccount) -> Result<Account, StoreError>;

    /// Atomically increments the failed-login counter and stamps
    /// `last_login_attempt`, returning the new count. `None` when the
    /// username does not exist (callers no-op silently).
    async fn increment_failed_attempts(&self, username: &str) -> Result<Option<i32>, StoreError>;

    /// Locks an account: `is_active = false`, `locked_at = at`. Idempotent.
    async fn lock_account(&self, username: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Clears a lock and the failure counter, re-activating the account.
    /// Returns whether the username existed.
    async fn unlock_account(&self, username: &str) -> Result<bool, StoreError>;

    /// Records a successful authentication: sets `last_login` and resets
    /// `failed_login_attempts` to zero.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;
}
