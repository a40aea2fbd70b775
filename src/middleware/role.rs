//! Role-based route authorization.
//!
//! Every role owns a set of path prefixes; an authenticated account whose
//! role differs from a prefix's owner is denied that prefix outright. The
//! decision logic is a pure function over the injected [`RoutePolicy`] so
//! it can be tested without a request in flight.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::config::policy::RoutePolicy;
use crate::middleware::auth::AuthContext;
use crate::modules::users::model::{Account, Role};
use crate::notify::Severity;
use crate::state::AppState;

/// Authorization outcome for a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Path belongs to another role: bounce to the index with a notice.
    Deny,
    /// Authenticated account whose stored role does not resolve: fatal to
    /// the request, force logout.
    RoleError,
    /// Generic dashboard path: send the client to its role dashboard.
    Dashboard(Role),
}

/// Decides what to do with `path` for an optionally authenticated account.
///
/// Unauthenticated traffic is always allowed through; keeping anonymous
/// routing open is the login flow's concern, not this component's.
pub fn authorize(policy: &RoutePolicy, path: &str, account: Option<&Account>) -> RouteDecision {
    let Some(account) = account else {
        return RouteDecision::Allow;
    };

    let Ok(role) = Role::parse(&account.role) else {
        return RouteDecision::RoleError;
    };

    // Deny takes precedence: check every prefix owned by a different role.
    // First match wins; order is immaterial because the sets are disjoint.
    for (owner, prefixes) in policy.entries() {
        if owner != role {
            for prefix in prefixes {
                if path.starts_with(prefix) {
                    return RouteDecision::Deny;
                }
            }
        }
    }

    if path == RoutePolicy::GENERIC_DASHBOARD {
        return RouteDecision::Dashboard(role);
    }

    RouteDecision::Allow
}

pub async fn role_router(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    info!("Authorizing request path: {path}");

    let auth = req.extensions().get::<AuthContext>().cloned();
    let decision = authorize(&state.policy, &path, auth.as_ref().map(|ctx| &ctx.account));

    // Every non-Allow decision implies an authenticated request, so the
    // context is matched alongside the decision.
    match (decision, auth) {
        (RouteDecision::Allow, _) | (_, None) => next.run(req).await,
        (RouteDecision::Deny, Some(ctx)) => {
            state.security_log.warning(&format!(
                "Unauthorized access attempt by {} to {}",
                ctx.account.username, path
            ));
            state
                .notifier
                .notify(
                    ctx.session.id,
                    Severity::Error,
                    "You do not have permission to access this page.",
                )
                .await;

            Redirect::to(RoutePolicy::INDEX).into_response()
        }
        (RouteDecision::RoleError, Some(ctx)) => {
            state.security_log.warning(&format!(
                "User {} has no resolvable role",
                ctx.account.username
            ));
            state
                .notifier
                .notify(
                    ctx.session.id,
                    Severity::Error,
                    "Your account has no assigned role. Contact the administrator.",
                )
                .await;

            Redirect::to(RoutePolicy::LOGOUT).into_response()
        }
        (RouteDecision::Dashboard(role), Some(ctx)) => {
            let target = state.policy.dashboard_path(role);
            info!("Redirecting {} to {}", ctx.account.username, target);

            Redirect::to(target).into_response()
        }
    }
}
