//! Response hardening headers across the pipeline.

mod common;

use axum::http::header;

use apr_portal::modules::users::model::Role;
use common::{build_app, create_account, get, get_with_cookie, sign_in};

fn security_headers() -> [(header::HeaderName, &'static str); 4] {
    [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "DENY"),
        (
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=31536000; includeSubDomains",
        ),
        (
            header::REFERRER_POLICY,
            "strict-origin-when-cross-origin",
        ),
    ]
}

#[tokio::test]
async fn test_unauthenticated_responses_carry_all_headers() {
    let test = build_app();

    let response = get(&test.app, "/").await;

    for (name, value) in &security_headers() {
        assert_eq!(
            response.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(*value),
            "missing {name}"
        );
    }

    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cache_control.contains("no-store"));
    assert!(cache_control.contains("no-cache"));
    assert!(cache_control.contains("must-revalidate"));
    assert_eq!(response.headers().get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(response.headers().get(header::EXPIRES).unwrap(), "0");
}

#[tokio::test]
async fn test_authenticated_responses_skip_cache_suppression() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;
    let cookie = sign_in(&test.app, "alice", "Correct1Password").await;

    let response = get_with_cookie(&test.app, "/dashboard/usuario/", &cookie).await;

    for (name, value) in &security_headers() {
        assert_eq!(
            response.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(*value),
            "missing {name}"
        );
    }
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn test_headers_appear_exactly_once() {
    let test = build_app();

    let response = get(&test.app, "/login/").await;

    for (name, _) in &security_headers() {
        assert_eq!(
            response.headers().get_all(name).iter().count(),
            1,
            "{name} duplicated"
        );
    }
    assert_eq!(
        response
            .headers()
            .get_all(header::CACHE_CONTROL)
            .iter()
            .count(),
        1
    );
}

#[tokio::test]
async fn test_short_circuited_responses_are_hardened_too() {
    let test = build_app();
    create_account(&test.accounts, "oper1", "Correct1Password", Role::Operario).await;
    let cookie = sign_in(&test.app, "oper1", "Correct1Password").await;

    // Deny-redirect from the role router, not a handler.
    let response = get_with_cookie(&test.app, "/dashboard/admin/", &cookie).await;

    for (name, value) in &security_headers() {
        assert_eq!(
            response.headers().get(name).and_then(|v| v.to_str().ok()),
            Some(*value),
            "missing {name}"
        );
    }
}

#[tokio::test]
async fn test_signout_response_suppresses_caching() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;
    let cookie = sign_in(&test.app, "alice", "Correct1Password").await;

    let response = get_with_cookie(&test.app, "/logout/", &cookie).await;

    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cache_control.contains("no-store"));
    assert_eq!(response.headers().get(header::EXPIRES).unwrap(), "0");
}
