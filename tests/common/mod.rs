use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use tower::ServiceExt;

use apr_portal::config::cors::CorsConfig;
use apr_portal::config::security::SecurityConfig;
use apr_portal::config::session::SessionConfig;
use apr_portal::modules::users::memory::MemoryAccountStore;
use apr_portal::modules::users::model::{NewAccount, Role};
use apr_portal::modules::users::store::AccountStore;
use apr_portal::router::init_router;
use apr_portal::session::memory::MemorySessionStore;
use apr_portal::state::AppState;
use apr_portal::utils::password::hash_password;

pub struct TestApp {
    pub app: Router,
    pub accounts: Arc<MemoryAccountStore>,
    pub sessions: Arc<MemorySessionStore>,
}

/// Full router over in-memory stores.
pub fn build_app() -> TestApp {
    let accounts = Arc::new(MemoryAccountStore::new());
    let sessions = Arc::new(MemorySessionStore::new(3600));

    let state = AppState::with_stores(
        accounts.clone(),
        sessions.clone(),
        SessionConfig::default(),
        SecurityConfig::default(),
        CorsConfig::default(),
    );

    TestApp {
        app: init_router(state),
        accounts,
        sessions,
    }
}

#[allow(dead_code)]
pub async fn create_account(
    accounts: &MemoryAccountStore,
    username: &str,
    password: &str,
    role: Role,
) {
    let hashed = hash_password(password).unwrap();
    accounts
        .create(NewAccount {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: hashed,
            role,
            direccion: None,
            telefono: None,
        })
        .await
        .unwrap();
}

/// Seeds an account with an arbitrary raw role string, bypassing the closed
/// role type. Used to set up malformed data.
#[allow(dead_code)]
pub async fn seed_account_with_raw_role(
    accounts: &MemoryAccountStore,
    username: &str,
    password: &str,
    raw_role: &str,
) {
    create_account(accounts, username, password, Role::Usuario).await;
    let mut account = accounts.lookup(username).await.unwrap().unwrap();
    account.role = raw_role.to_string();
    accounts.seed(account).await;
}

#[allow(dead_code)]
pub async fn get(app: &Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn get_with_cookie(app: &Router, path: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn post_login(app: &Router, username: &str, password: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/login/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={username}&password={password}"
        )))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// Pulls the `apr_session=<id>` pair out of a response for reuse as a
/// `Cookie` header.
#[allow(dead_code)]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("apr_session="))
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

#[allow(dead_code)]
pub fn session_id(cookie: &str) -> uuid::Uuid {
    let value = cookie.strip_prefix("apr_session=").unwrap();
    uuid::Uuid::parse_str(value).unwrap()
}

#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Signs a user in and returns the session cookie pair.
#[allow(dead_code)]
pub async fn sign_in(app: &Router, username: &str, password: &str) -> String {
    let response = post_login(app, username, password).await;
    session_cookie(&response).expect("login should set a session cookie")
}
