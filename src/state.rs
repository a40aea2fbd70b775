use std::sync::Arc;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::policy::RoutePolicy;
use crate::config::security::SecurityConfig;
use crate::config::session::SessionConfig;
use crate::logging::{AuditLog, SecurityLog};
use crate::modules::auth::events::AuthEventLogger;
use crate::modules::auth::lockout::{LockoutPolicy, LockoutTracker};
use crate::modules::users::pg::PgAccountStore;
use crate::modules::users::store::AccountStore;
use crate::notify::Notifier;
use crate::session::memory::MemorySessionStore;
use crate::session::redis::RedisSessionStore;
use crate::session::store::SessionStore;

/// Shared application state.
///
/// Stores are held as trait objects: the authorization core treats
/// credential and session storage as boundary collaborators, which also
/// lets tests run the full router against in-memory backends.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub policy: Arc<RoutePolicy>,
    pub session_config: SessionConfig,
    pub cors_config: CorsConfig,
    pub events: Arc<AuthEventLogger>,
    pub notifier: Notifier,
    pub audit_log: AuditLog,
    pub security_log: SecurityLog,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_config", &self.session_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the component graph over the given store backends.
    pub fn with_stores(
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn SessionStore>,
        session_config: SessionConfig,
        security_config: SecurityConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let audit_log = AuditLog;
        let security_log = SecurityLog;

        let lockout = LockoutTracker::new(
            accounts.clone(),
            LockoutPolicy::new(security_config.lockout_threshold),
            security_log,
        );
        let events = Arc::new(AuthEventLogger::new(audit_log, security_log, lockout));
        let notifier = Notifier::new(sessions.clone());

        Self {
            accounts,
            sessions,
            policy: Arc::new(RoutePolicy::default()),
            session_config,
            cors_config,
            events,
            notifier,
            audit_log,
            security_log,
        }
    }
}

/// Builds the production state: Postgres accounts, Redis sessions when
/// `REDIS_URL` is set (in-process store otherwise).
pub async fn init_app_state() -> AppState {
    let session_config = SessionConfig::from_env();

    let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(init_db_pool().await));

    let sessions: Arc<dyn SessionStore> = match std::env::var("REDIS_URL") {
        Ok(redis_url) => Arc::new(
            RedisSessionStore::new(&redis_url, session_config.store_ttl_secs)
                .await
                .expect("Failed to connect to Redis"),
        ),
        Err(_) => Arc::new(MemorySessionStore::new(session_config.store_ttl_secs)),
    };

    AppState::with_stores(
        accounts,
        sessions,
        session_config,
        SecurityConfig::from_env(),
        CorsConfig::from_env(),
    )
}
