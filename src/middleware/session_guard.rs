//! Session lifetime guard.
//!
//! Resolves the session cookie into an [`AuthContext`] for downstream
//! stages and enforces the absolute session ceiling: a session older than
//! `absolute_timeout_secs` (measured from its first authenticated request)
//! is flushed and the client is sent back to the login page, regardless of
//! how fresh the store's own TTL thinks the session is.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use tracing::error;

use crate::config::policy::RoutePolicy;
use crate::middleware::auth::{AuthContext, AuthenticatedRequest};
use crate::modules::users::model::Account;
use crate::notify::Severity;
use crate::session::{SessionRecord, session_cookie, session_id_from_jar};
use crate::state::AppState;

/// Outcome of resolving the cookie against the stores.
enum SessionState {
    Anonymous,
    /// A session exists but carries no login (flash carrier).
    Detached(SessionRecord),
    Authenticated(Account, SessionRecord),
    Expired(Account),
}

pub async fn session_guard(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let resolved = resolve_session(&state, &jar).await;

    let authenticated = matches!(resolved, SessionState::Authenticated(..));

    match resolved {
        SessionState::Anonymous => {}
        SessionState::Detached(record) => {
            req.extensions_mut().insert(record);
        }
        SessionState::Authenticated(account, record) => {
            req.extensions_mut().insert(record.clone());
            req.extensions_mut().insert(AuthContext {
                account,
                session: record,
            });
        }
        SessionState::Expired(account) => {
            state.security_log.warning(&format!(
                "Session timeout for user {}",
                account.username
            ));

            let carrier = state
                .notifier
                .notify_detached(
                    Severity::Warning,
                    "Your session has expired. Please sign in again.",
                )
                .await;

            let mut response = Redirect::to(RoutePolicy::LOGIN).into_response();
            if let Some(carrier) = carrier {
                set_session_cookie(&mut response, carrier.id);
            }
            return response;
        }
    }

    let mut response = next.run(req).await;
    if authenticated {
        response.extensions_mut().insert(AuthenticatedRequest);
    }

    response
}

/// Cookie → session record → account resolution plus the lifetime check.
async fn resolve_session(state: &AppState, jar: &CookieJar) -> SessionState {
    let Some(session_id) = session_id_from_jar(jar) else {
        return SessionState::Anonymous;
    };
    let Some(mut record) = state.sessions.get(session_id).await else {
        return SessionState::Anonymous;
    };

    let Some(account_id) = record.account_id else {
        return SessionState::Detached(record);
    };

    let account = match state.accounts.lookup_by_id(account_id).await {
        Ok(Some(account)) if account.is_active => account,
        Ok(_) => {
            // Dangling or deactivated owner: the session is worthless.
            flush_session(state, session_id).await;
            return SessionState::Anonymous;
        }
        Err(err) => {
            error!(error = %err, "Account lookup failed during session resolution");
            return SessionState::Anonymous;
        }
    };

    let now = Utc::now();
    match record.initiated_at {
        None => {
            // First authenticated request: Unmarked -> Timed.
            record.initiated_at = Some(now);
        }
        Some(initiated_at) => {
            let limit = Duration::seconds(state.session_config.absolute_timeout_secs);
            if now - initiated_at > limit {
                flush_session(state, session_id).await;
                return SessionState::Expired(account);
            }
        }
    }

    // Persist the stamp and re-arm the store TTL.
    if let Err(err) = state.sessions.set(&record).await {
        error!(error = %err, "Failed to refresh session record");
    }

    SessionState::Authenticated(account, record)
}

async fn flush_session(state: &AppState, session_id: uuid::Uuid) {
    if let Err(err) = state.sessions.flush(session_id).await {
        error!(error = %err, "Failed to flush session");
    }
}

/// Appends a `Set-Cookie` for a session id onto an in-flight response.
pub fn set_session_cookie(response: &mut Response, session_id: uuid::Uuid) {
    let cookie = session_cookie(session_id);
    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
