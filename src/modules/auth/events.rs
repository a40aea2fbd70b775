//! Authentication event handling.
//!
//! Login, failed-login and logout events feed the audit and security
//! channels and drive the lockout tracker. Handlers return typed results
//! internally; [`AuthEventLogger::handle`] is the single point that
//! suppresses them, so a logging or store failure degrades to the error
//! channel instead of blocking the authentication flow.

use tracing::error;

use crate::logging::{AuditLog, SecurityLog};
use crate::modules::auth::lockout::LockoutTracker;
use crate::modules::users::model::Account;
use crate::modules::users::store::StoreError;
use crate::utils::client_info::ClientInfo;

/// The three authentication events the portal reacts to.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    LoginSucceeded {
        account: Account,
        client: ClientInfo,
    },
    LoginFailed {
        /// As typed by the client; not validated to exist.
        attempted_username: String,
        client: ClientInfo,
    },
    LoggedOut {
        account: Account,
        client: ClientInfo,
    },
}

/// Reacts to [`AuthEvent`]s. Fire-and-forget from the caller's point of
/// view: `handle` never fails.
#[derive(Clone)]
pub struct AuthEventLogger {
    audit: AuditLog,
    security: SecurityLog,
    lockout: LockoutTracker,
}

impl std::fmt::Debug for AuthEventLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEventLogger").finish_non_exhaustive()
    }
}

impl AuthEventLogger {
    pub fn new(audit: AuditLog, security: SecurityLog, lockout: LockoutTracker) -> Self {
        Self {
            audit,
            security,
            lockout,
        }
    }

    pub async fn handle(&self, event: AuthEvent) {
        let outcome = match &event {
            AuthEvent::LoginSucceeded { account, client } => {
                self.on_login_succeeded(account, client).await
            }
            AuthEvent::LoginFailed {
                attempted_username,
                client,
            } => self.on_login_failed(attempted_username, client).await,
            AuthEvent::LoggedOut { account, client } => self.on_logged_out(account, client).await,
        };

        if let Err(err) = outcome {
            error!(error = %err, "Failed to record authentication event");
        }
    }

    async fn on_login_succeeded(
        &self,
        account: &Account,
        client: &ClientInfo,
    ) -> Result<(), StoreError> {
        self.lockout.record_success(account).await?;

        self.security.info(&format!(
            "Login succeeded - user: {}, role: {}, ip: {}, user_agent: {}",
            account.username, account.role, client.ip, client.user_agent
        ));
        self.audit.info(&format!(
            "Login - user: {}, role: {}",
            account.username, account.role
        ));

        Ok(())
    }

    async fn on_login_failed(
        &self,
        attempted_username: &str,
        client: &ClientInfo,
    ) -> Result<(), StoreError> {
        self.security.warning(&format!(
            "Failed login attempt - user: {}, ip: {}, user_agent: {}",
            attempted_username, client.ip, client.user_agent
        ));

        self.lockout.record_failed_attempt(attempted_username).await
    }

    async fn on_logged_out(&self, account: &Account, client: &ClientInfo) -> Result<(), StoreError> {
        self.security.info(&format!(
            "Logout - user: {}, role: {}, ip: {}, user_agent: {}",
            account.username, account.role, client.ip, client.user_agent
        ));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::lockout::LockoutPolicy;
    use crate::modules::users::memory::MemoryAccountStore;
    use crate::modules::users::model::{NewAccount, Role};
    use crate::modules::users::store::AccountStore;
    use std::sync::Arc;

    fn client() -> ClientInfo {
        ClientInfo {
            ip: "203.0.113.9".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    fn logger(accounts: Arc<MemoryAccountStore>) -> AuthEventLogger {
        let lockout = LockoutTracker::new(accounts, LockoutPolicy::default(), SecurityLog);
        AuthEventLogger::new(AuditLog, SecurityLog, lockout)
    }

    async fn seed_user(accounts: &MemoryAccountStore, username: &str) -> Account {
        accounts
            .create(NewAccount {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "hash".to_string(),
                role: Role::Usuario,
                direccion: None,
                telefono: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_failed_drives_lockout() {
        let accounts = Arc::new(MemoryAccountStore::new());
        seed_user(&accounts, "alice").await;
        let logger = logger(accounts.clone());

        for _ in 0..5 {
            logger
                .handle(AuthEvent::LoginFailed {
                    attempted_username: "alice".to_string(),
                    client: client(),
                })
                .await;
        }

        let account = accounts.lookup("alice").await.unwrap().unwrap();
        assert!(!account.is_active);
        assert!(account.locked_at.is_some());
    }

    #[tokio::test]
    async fn test_login_failed_for_unknown_username_does_not_panic() {
        let accounts = Arc::new(MemoryAccountStore::new());
        let logger = logger(accounts);

        logger
            .handle(AuthEvent::LoginFailed {
                attempted_username: "nobody".to_string(),
                client: client(),
            })
            .await;
    }

    #[tokio::test]
    async fn test_login_succeeded_updates_last_login() {
        let accounts = Arc::new(MemoryAccountStore::new());
        let account = seed_user(&accounts, "alice").await;
        let logger = logger(accounts.clone());

        logger
            .handle(AuthEvent::LoginSucceeded {
                account,
                client: client(),
            })
            .await;

        let account = accounts.lookup("alice").await.unwrap().unwrap();
        assert!(account.last_login.is_some());
        assert_eq!(account.failed_login_attempts, 0);
    }
}
