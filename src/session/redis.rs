//! Redis-backed session store for production deployments.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error};
use uuid::Uuid;

use super::record::SessionRecord;
use super::store::{SessionStore, SessionStoreError};

/// Session store over a shared Redis, with per-record TTL enforcement done
/// by the server (`SETEX`).
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

fn session_key(id: Uuid) -> String {
    format!("session:{id}")
}

impl RedisSessionStore {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Backend` if the connection fails.
    pub async fn new(redis_url: &str, ttl_secs: u64) -> Result<Self, SessionStoreError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, ttl_secs })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: Uuid) -> Option<SessionRecord> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(session_key(id)).await {
            Ok(Some(value)) => match serde_json::from_str(&value) {
                Ok(record) => Some(record),
                Err(e) => {
                    error!(session.id = %id, error = %e, "Failed to deserialize session record");
                    None
                }
            },
            Ok(None) => {
                debug!(session.id = %id, "Session miss");
                None
            }
            Err(e) => {
                error!(session.id = %id, error = %e, "Redis GET error");
                None
            }
        }
    }

    async fn set(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(record)?;

        conn.set_ex::<_, _, ()>(session_key(record.id), json, self.ttl_secs)
            .await?;

        debug!(session.id = %record.id, ttl_secs = %self.ttl_secs, "Session written");

        Ok(())
    }

    async fn flush(&self, id: Uuid) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(session_key(id)).await?;

        debug!(session.id = %id, "Session flushed");

        Ok(())
    }
}
