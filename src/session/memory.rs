//! In-memory session store for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::record::SessionRecord;
use super::store::{SessionStore, SessionStoreError};

/// Session store holding records in a map with lazy expiry.
#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    inner: RwLock<HashMap<Uuid, (SessionRecord, DateTime<Utc>)>>,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            inner: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: Uuid) -> Option<SessionRecord> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&id) {
            Some((record, expires_at)) if *expires_at > Utc::now() => Some(record.clone()),
            Some(_) => {
                sessions.remove(&id);
                None
            }
            None => None,
        }
    }

    async fn set(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        self.inner
            .write()
            .await
            .insert(record.id, (record.clone(), Utc::now() + self.ttl));

        Ok(())
    }

    async fn flush(&self, id: Uuid) -> Result<(), SessionStoreError> {
        self.inner.write().await.remove(&id);

        Ok(())
    }
}
