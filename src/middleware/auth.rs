//! Authentication context and extractors.
//!
//! The session lifetime guard resolves the cookie to an [`AuthContext`] and
//! stashes it (and the raw [`SessionRecord`], including anonymous ones) in
//! request extensions; handlers pull them back out through the extractors
//! here instead of re-touching the stores.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::policy::RoutePolicy;
use crate::modules::users::model::Account;
use crate::session::SessionRecord;
use crate::state::AppState;

/// The authenticated account plus its live session.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub account: Account,
    pub session: SessionRecord,
}

/// Marker inserted into *response* extensions by the session guard when the
/// request carried a valid authenticated session. The hardening stage keys
/// cache suppression off its absence.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedRequest;

/// Extractor for handlers that require a signed-in account. Anonymous
/// requests are bounced to the login page.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

/// Rejection used by [`AuthUser`].
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(RoutePolicy::LOGIN).into_response()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthUser)
            .ok_or(LoginRedirect)
    }
}

/// Extractor for handlers that adapt to auth state instead of requiring it.
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthContext>);

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<AuthContext>().cloned()))
    }
}

/// The request's session record, authenticated or anonymous, when one
/// exists. Pages use it to drain flash notices.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<SessionRecord>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(
            parts.extensions.get::<SessionRecord>().cloned(),
        ))
    }
}
