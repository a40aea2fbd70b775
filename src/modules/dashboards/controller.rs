use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::policy::RoutePolicy;
use crate::middleware::auth::{AuthUser, CurrentSession, MaybeAuth};
use crate::modules::auth::controller::redirect_signed_in;
use crate::modules::pages;
use crate::modules::users::model::Role;
use crate::notify::Severity;
use crate::state::AppState;

/// Landing page. Authenticated visitors are bounced to their dashboard.
pub async fn index(
    State(state): State<AppState>,
    MaybeAuth(auth): MaybeAuth,
    CurrentSession(session): CurrentSession,
) -> Response {
    if let Some(ctx) = auth {
        return redirect_signed_in(&state, ctx).await;
    }

    let flashes = match &session {
        Some(record) => state.notifier.take_flashes(record.id).await,
        None => Vec::new(),
    };

    pages::render(
        "APR Portal",
        "<h1>APR Portal</h1>\
         <p><a href=\"/login/\">Sign in</a> or <a href=\"/registro/\">register</a>.</p>",
        &flashes,
    )
    .into_response()
}

/// Generic dashboard path. The role router resolves this for authenticated
/// requests before it ever reaches the handler; anonymous clients land here
/// and are sent to the login page.
pub async fn dashboard_fallback() -> Redirect {
    Redirect::to(RoutePolicy::LOGIN)
}

pub async fn admin_dashboard(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Response {
    role_dashboard(&state, ctx, Role::Administrador, "Administrator dashboard").await
}

pub async fn secretaria_dashboard(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Response {
    role_dashboard(&state, ctx, Role::Secretaria, "Secretary dashboard").await
}

pub async fn operario_dashboard(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Response {
    role_dashboard(&state, ctx, Role::Operario, "Operator dashboard").await
}

pub async fn usuario_dashboard(
    State(state): State<AppState>,
    AuthUser(ctx): AuthUser,
) -> Response {
    role_dashboard(&state, ctx, Role::Usuario, "My dashboard").await
}

pub async fn access_denied(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Response {
    let flashes = match &session {
        Some(record) => state.notifier.take_flashes(record.id).await,
        None => Vec::new(),
    };

    (
        StatusCode::FORBIDDEN,
        pages::render(
            "Access denied",
            "<h1>Access denied</h1><p>You do not have permission to view this page.</p>",
            &flashes,
        ),
    )
        .into_response()
}

/// The role router already fences foreign dashboards off; this re-check is
/// the handler-level belt for direct wiring mistakes. Mismatches bounce to
/// the caller's own dashboard.
async fn role_dashboard(
    state: &AppState,
    ctx: crate::middleware::auth::AuthContext,
    expected: Role,
    title: &str,
) -> Response {
    match Role::parse(&ctx.account.role) {
        Ok(role) if role == expected => {
            let flashes = state.notifier.take_flashes(ctx.session.id).await;
            let body = format!(
                "<h1>{title}</h1><p>Signed in as {}.</p><p><a href=\"/logout/\">Sign out</a></p>",
                ctx.account.username
            );
            pages::render(title, &body, &flashes).into_response()
        }
        Ok(role) => {
            state
                .notifier
                .notify(
                    ctx.session.id,
                    Severity::Error,
                    "You do not have permission to access this dashboard.",
                )
                .await;
            Redirect::to(state.policy.dashboard_path(role)).into_response()
        }
        Err(_) => Redirect::to(RoutePolicy::LOGOUT).into_response(),
    }
}
