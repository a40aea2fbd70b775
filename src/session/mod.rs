//! Server-side sessions.
//!
//! The cookie carries only a v4 session id; all state lives behind
//! [`SessionStore`]. The cookie itself is a browser-session cookie (no
//! `Max-Age`): store-side TTL bounds its useful life at 3600 s, and the
//! lifetime guard enforces the 7200 s absolute ceiling on top.

pub mod memory;
pub mod record;
pub mod redis;
pub mod store;

pub use self::record::SessionRecord;
pub use self::store::{SessionStore, SessionStoreError};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "apr_session";

/// Builds the session cookie for a record id.
pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Reads the session id out of a cookie jar, ignoring malformed values.
pub fn session_id_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}
