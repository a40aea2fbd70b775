use axum::{
    extract::{Form, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::error;

use crate::config::policy::RoutePolicy;
use crate::middleware::auth::{CurrentSession, MaybeAuth};
use crate::modules::pages;
use crate::modules::users::model::Role;
use crate::notify::Severity;
use crate::session::{SESSION_COOKIE, SessionRecord, session_cookie, session_id_from_jar};
use crate::state::AppState;
use crate::utils::client_info::ClientInfo;

use super::events::AuthEvent;
use super::model::{LoginForm, RegisterForm};
use super::service::{AuthService, RegisterRejection};

/// Sends an already-authenticated client to its own dashboard; public pages
/// (index, login, registration) are for anonymous visitors only.
pub async fn redirect_signed_in(
    state: &AppState,
    ctx: crate::middleware::auth::AuthContext,
) -> Response {
    state
        .notifier
        .notify(ctx.session.id, Severity::Warning, "You are already signed in.")
        .await;

    let target = match Role::parse(&ctx.account.role) {
        Ok(role) => state.policy.dashboard_path(role),
        Err(_) => RoutePolicy::INDEX,
    };

    Redirect::to(target).into_response()
}

/// Flashes `messages` and redirects, creating an anonymous session to carry
/// them when the client has none.
async fn flash_and_redirect(
    state: &AppState,
    jar: CookieJar,
    level: Severity,
    messages: &[String],
    target: &str,
) -> Response {
    if let Some(session_id) = session_id_from_jar(&jar) {
        if state.sessions.get(session_id).await.is_some() {
            for message in messages {
                state.notifier.notify(session_id, level, message).await;
            }
            return Redirect::to(target).into_response();
        }
    }

    let Some((first, rest)) = messages.split_first() else {
        return Redirect::to(target).into_response();
    };
    match state.notifier.notify_detached(level, first).await {
        Some(record) => {
            for message in rest {
                state.notifier.notify(record.id, level, message).await;
            }
            (jar.add(session_cookie(record.id)), Redirect::to(target)).into_response()
        }
        None => Redirect::to(target).into_response(),
    }
}

pub async fn login_page(
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
        "Sign in",
        "<h1>Sign in</h1>\
         <form method=\"post\" action=\"/login/\">\
         <input name=\"username\" placeholder=\"Username\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <button type=\"submit\">Sign in</button></form>",
        &flashes,
    )
    .into_response()
}

pub async fn login(
    State(state): State<AppState>,
    MaybeAuth(auth): MaybeAuth,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Some(ctx) = auth {
        return redirect_signed_in(&state, ctx).await;
    }

    let client = ClientInfo::from_headers(&headers);

    match AuthService::authenticate(state.accounts.as_ref(), &form.username, &form.password).await
    {
        Ok(Some(account)) => {
            let record = SessionRecord::for_account(account.id);
            if let Err(err) = state.sessions.set(&record).await {
                error!(error = %err, "Failed to create session on login");
                return flash_and_redirect(
                    &state,
                    jar,
                    Severity::Error,
                    &["Something went wrong. Please try again.".to_string()],
                    RoutePolicy::LOGIN,
                )
                .await;
            }

            state
                .events
                .handle(AuthEvent::LoginSucceeded {
                    account: account.clone(),
                    client,
                })
                .await;

            let target = match Role::parse(&account.role) {
                Ok(role) => state.policy.dashboard_path(role),
                Err(_) => RoutePolicy::INDEX,
            };

            (jar.add(session_cookie(record.id)), Redirect::to(target)).into_response()
        }
        Ok(None) => {
            state
                .events
                .handle(AuthEvent::LoginFailed {
                    attempted_username: form.username.clone(),
                    client,
                })
                .await;

            flash_and_redirect(
                &state,
                jar,
                Severity::Error,
                &["Invalid credentials.".to_string()],
                RoutePolicy::LOGIN,
            )
            .await
        }
        Err(err) => {
            error!(error = %err.error, "Credential check failed");
            flash_and_redirect(
                &state,
                jar,
                Severity::Error,
                &["Something went wrong. Please try again.".to_string()],
                RoutePolicy::LOGIN,
            )
            .await
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    MaybeAuth(auth): MaybeAuth,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    if let Some(ctx) = &auth {
        let client = ClientInfo::from_headers(&headers);
        state
            .events
            .handle(AuthEvent::LoggedOut {
                account: ctx.account.clone(),
                client,
            })
            .await;

        if let Err(err) = state.sessions.flush(ctx.session.id).await {
            error!(error = %err, "Failed to flush session on logout");
        }
    }

    let carrier = state
        .notifier
        .notify_detached(Severity::Success, "You have signed out successfully.")
        .await;
    let jar = match &carrier {
        Some(record) => jar.add(session_cookie(record.id)),
        None => jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build()),
    };

    let mut response = (jar, Redirect::to(RoutePolicy::INDEX)).into_response();

    // Explicit cache suppression on sign-out, on top of whatever the
    // hardening stage decides: the previous page must not survive the
    // browser cache.
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));

    response
}

pub async fn register_page(
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
        "Registration",
        "<h1>Create your account</h1>\
         <form method=\"post\" action=\"/registro/\">\
         <input name=\"username\" placeholder=\"Username\">\
         <input name=\"email\" type=\"email\" placeholder=\"Email\">\
         <input name=\"password\" type=\"password\" placeholder=\"Password\">\
         <input name=\"password_confirm\" type=\"password\" placeholder=\"Confirm password\">\
         <input name=\"telefono\" placeholder=\"Phone (optional)\">\
         <input name=\"direccion\" placeholder=\"Address (optional)\">\
         <button type=\"submit\">Register</button></form>",
        &flashes,
    )
    .into_response()
}

pub async fn register(
    State(state): State<AppState>,
    MaybeAuth(auth): MaybeAuth,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Some(ctx) = auth {
        return redirect_signed_in(&state, ctx).await;
    }

    match AuthService::register(state.accounts.as_ref(), form).await {
        Ok(account) => {
            state.audit_log.info(&format!(
                "New account created - username: {}, role: {}",
                account.username, account.role
            ));

            flash_and_redirect(
                &state,
                jar,
                Severity::Success,
                &["Registration successful! Please sign in.".to_string()],
                RoutePolicy::LOGIN,
            )
            .await
        }
        Err(RegisterRejection::Invalid(messages)) => {
            flash_and_redirect(&state, jar, Severity::Error, &messages, RoutePolicy::REGISTER)
                .await
        }
        Err(RegisterRejection::Internal(err)) => {
            error!(error = %err.error, "Registration failed");
            flash_and_redirect(
                &state,
                jar,
                Severity::Error,
                &["Something went wrong. Please try again.".to_string()],
                RoutePolicy::REGISTER,
            )
            .await
        }
    }
}
