//! Session store boundary.

use async_trait::async_trait;
use uuid::Uuid;

use super::record::SessionRecord;

/// Error type for session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Keyed, per-client, TTL-bound session storage.
///
/// Backends bound every record at the cookie TTL (3600 s) and re-arm it on
/// each write; the 7200 s absolute ceiling is the lifetime guard's job, on
/// purpose independent of this store's expiry.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Fetches a live session record. Backend failures degrade to `None`
    /// (and an error-channel log entry); a session lookup must never take
    /// down the request.
    async fn get(&self, id: Uuid) -> Option<SessionRecord>;

    /// Upserts a record, re-arming its TTL.
    async fn set(&self, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Destroys a session outright (logout, timeout).
    async fn flush(&self, id: Uuid) -> Result<(), SessionStoreError>;
}
