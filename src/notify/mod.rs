//! User-visible notices (flash messages).
//!
//! Notices ride the session record and are drained by the next rendered
//! page. Store failures degrade to the error channel; a notice that cannot
//! be written must never fail the request that produced it.

pub mod flash;

pub use self::flash::{FlashMessage, Severity};

use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::session::{SessionRecord, SessionStore};

/// Handle for posting flash notices into sessions.
#[derive(Clone)]
pub struct Notifier {
    sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Appends a notice to an existing session. Missing sessions and store
    /// failures are logged and swallowed.
    pub async fn notify(&self, session_id: Uuid, level: Severity, message: &str) {
        let Some(mut record) = self.sessions.get(session_id).await else {
            error!(session.id = %session_id, "Dropping notice for unknown session: {message}");
            return;
        };

        record.flashes.push(FlashMessage::new(level, message));
        if let Err(err) = self.sessions.set(&record).await {
            error!(session.id = %session_id, error = %err, "Failed to persist notice");
        }
    }

    /// Creates a fresh anonymous session carrying a single notice, for
    /// clients that have no session (or just lost one). Returns `None` when
    /// the store rejects the write; the caller redirects without the notice
    /// rather than failing.
    pub async fn notify_detached(&self, level: Severity, message: &str) -> Option<SessionRecord> {
        let mut record = SessionRecord::anonymous();
        record.flashes.push(FlashMessage::new(level, message));

        match self.sessions.set(&record).await {
            Ok(()) => Some(record),
            Err(err) => {
                error!(error = %err, "Failed to create session for notice");
                None
            }
        }
    }

    /// Drains pending notices for rendering.
    pub async fn take_flashes(&self, session_id: Uuid) -> Vec<FlashMessage> {
        let Some(mut record) = self.sessions.get(session_id).await else {
            return Vec::new();
        };
        if record.flashes.is_empty() {
            return Vec::new();
        }

        let flashes = std::mem::take(&mut record.flashes);
        if let Err(err) = self.sessions.set(&record).await {
            error!(session.id = %session_id, error = %err, "Failed to clear notices");
        }

        flashes
    }
}
