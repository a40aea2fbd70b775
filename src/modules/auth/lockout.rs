//! Account lockout tracking.
//!
//! Pure threshold logic in [`LockoutPolicy`], persistence effects in
//! [`LockoutTracker`]. The threshold is absolute: five cumulative failures
//! since the last success lock the account, with no decay window for old
//! failures. Unlocking requires operator intervention (see `cli`).

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::logging::SecurityLog;
use crate::modules::users::model::Account;
use crate::modules::users::store::{AccountStore, StoreError};

pub const DEFAULT_LOCKOUT_THRESHOLD: i32 = 5;

/// Outcome of applying the policy to a failure count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutDecision {
    /// Below threshold; keep watching.
    Monitor,
    /// Threshold reached; the account must be locked.
    Lock,
}

/// Threshold policy over the cumulative failure counter.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    pub threshold: i32,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_LOCKOUT_THRESHOLD,
        }
    }
}

impl LockoutPolicy {
    pub fn new(threshold: i32) -> Self {
        Self { threshold }
    }

    pub fn decide(&self, failed_attempts: i32) -> LockoutDecision {
        if failed_attempts >= self.threshold {
            LockoutDecision::Lock
        } else {
            LockoutDecision::Monitor
        }
    }
}

/// Applies the lockout policy against the account store.
#[derive(Clone)]
pub struct LockoutTracker {
    accounts: Arc<dyn AccountStore>,
    policy: LockoutPolicy,
    security: SecurityLog,
}

impl std::fmt::Debug for LockoutTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockoutTracker")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl LockoutTracker {
    pub fn new(accounts: Arc<dyn AccountStore>, policy: LockoutPolicy, security: SecurityLog) -> Self {
        Self {
            accounts,
            policy,
            security,
        }
    }

    /// Registers one failed attempt for a username.
    ///
    /// Unknown usernames are a silent no-op; the attempt was already logged
    /// by the event handler and confirming account existence to the caller
    /// would invite enumeration. Attempts against an already-locked account
    /// keep counting and re-assert the lock.
    pub async fn record_failed_attempt(&self, username: &str) -> Result<(), StoreError> {
        let Some(count) = self.accounts.increment_failed_attempts(username).await? else {
            debug!(username = %username, "Failed attempt for unknown username ignored");
            return Ok(());
        };

        if self.policy.decide(count) == LockoutDecision::Lock {
            self.accounts.lock_account(username, Utc::now()).await?;
            self.security
                .critical(&format!("Account locked - user: {username}"));
        }

        Ok(())
    }

    /// Registers a successful authentication: stamps `last_login` and
    /// resets the failure counter.
    pub async fn record_success(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts.record_login(account.id, Utc::now()).await
    }
}
