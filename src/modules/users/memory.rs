//! In-memory account store for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{Account, NewAccount};
use super::store::{AccountStore, StoreError};

/// Account store backed by a map keyed on username.
///
/// Counter updates happen under the write lock, which is the in-process
/// equivalent of the row lock the Postgres store relies on.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    inner: RwLock<HashMap<String, Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an account verbatim, bypassing duplicate checks. Test
    /// fixtures use this to set up accounts in arbitrary states.
    pub async fn seed(&self, account: Account) {
        self.inner
            .write()
            .await
            .insert(account.username.clone(), account);
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn lookup(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.inner.read().await.get(username).cloned())
    }

    async fn lookup_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().await.values().any(|a| a.email == email))
    }

    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self.inner.write().await;
        if accounts.contains_key(&new.username)
            || accounts.values().any(|a| a.email == new.email)
        {
            return Err(StoreError::Duplicate);
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            username: new.username.clone(),
            email: new.email,
            password: new.password,
            role: new.role.as_str().to_string(),
            direccion: new.direccion,
            telefono: new.telefono,
            failed_login_attempts: 0,
            last_login_attempt: None,
            locked_at: None,
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(new.username, account.clone());

        Ok(account)
    }

    async fn increment_failed_attempts(&self, username: &str) -> Result<Option<i32>, StoreError> {
        let mut accounts = self.inner.write().await;
        let Some(account) = accounts.get_mut(username) else {
            return Ok(None);
        };

        let now = Utc::now();
        account.failed_login_attempts += 1;
        account.last_login_attempt = Some(now);
        account.updated_at = now;

        Ok(Some(account.failed_login_attempts))
    }

    async fn lock_account(&self, username: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut accounts = self.inner.write().await;
        if let Some(account) = accounts.get_mut(username) {
            account.is_active = false;
            account.locked_at = Some(at);
            account.updated_at = at;
        }

        Ok(())
    }

    async fn unlock_account(&self, username: &str) -> Result<bool, StoreError> {
        let mut accounts = self.inner.write().await;
        let Some(account) = accounts.get_mut(username) else {
            return Ok(false);
        };

        account.is_active = true;
        account.locked_at = None;
        account.failed_login_attempts = 0;
        account.updated_at = Utc::now();

        Ok(true)
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut accounts = self.inner.write().await;
        if let Some(account) = accounts.values_mut().find(|a| a.id == id) {
            account.last_login = Some(at);
            account.failed_login_attempts = 0;
            account.updated_at = at;
        }

        Ok(())
    }
}
