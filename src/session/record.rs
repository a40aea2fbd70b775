use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notify::flash::FlashMessage;

/// Server-side session state, keyed by the id carried in the session
/// cookie.
///
/// `initiated_at` is stamped by the lifetime guard on the first
/// *authenticated* request, not when the cookie is minted; the absolute
/// session ceiling is measured from it. Anonymous records
/// (`account_id = None`) exist solely to carry flash messages to clients
/// without a login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub account_id: Option<Uuid>,
    pub initiated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flashes: Vec<FlashMessage>,
}

impl SessionRecord {
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: None,
            initiated_at: None,
            flashes: Vec::new(),
        }
    }

    pub fn for_account(account_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: Some(account_id),
            initiated_at: None,
            flashes: Vec::new(),
        }
    }
}
