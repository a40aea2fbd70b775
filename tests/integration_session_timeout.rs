//! Absolute session timeout enforcement.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use apr_portal::modules::users::model::Role;
use apr_portal::modules::users::store::AccountStore;
use apr_portal::session::SessionStore;
use common::{build_app, create_account, get_with_cookie, location, session_cookie, session_id, sign_in};

async fn age_session(test: &common::TestApp, cookie: &str, elapsed_secs: i64) {
    let id = session_id(cookie);
    let mut record = test.sessions.get(id).await.unwrap();
    record.initiated_at = Some(Utc::now() - Duration::seconds(elapsed_secs));
    test.sessions.set(&record).await.unwrap();
}

#[tokio::test]
async fn test_session_older_than_ceiling_is_forced_out() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;
    let cookie = sign_in(&test.app, "alice", "Correct1Password").await;

    age_session(&test, &cookie, 7201).await;

    let response = get_with_cookie(&test.app, "/dashboard/usuario/", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login/"));

    // The old session is gone.
    assert!(test.sessions.get(session_id(&cookie)).await.is_none());

    // A fresh anonymous session carries the expiry notice.
    let carrier = session_cookie(&response).expect("expiry should set a carrier cookie");
    let record = test.sessions.get(session_id(&carrier)).await.unwrap();
    assert_eq!(record.account_id, None);
    assert_eq!(record.flashes.len(), 1);
    assert!(record.flashes[0].message.contains("expired"));
}

#[tokio::test]
async fn test_session_just_under_the_ceiling_survives() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;
    let cookie = sign_in(&test.app, "alice", "Correct1Password").await;

    age_session(&test, &cookie, 7199).await;

    let response = get_with_cookie(&test.app, "/dashboard/usuario/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(test.sessions.get(session_id(&cookie)).await.is_some());
}

#[tokio::test]
async fn test_first_authenticated_request_stamps_initiated_at() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;

    // Login creates the record unstamped; the timer starts on first use.
    let cookie = sign_in(&test.app, "alice", "Correct1Password").await;
    let record = test.sessions.get(session_id(&cookie)).await.unwrap();
    assert!(record.initiated_at.is_none());

    get_with_cookie(&test.app, "/dashboard/usuario/", &cookie).await;

    let record = test.sessions.get(session_id(&cookie)).await.unwrap();
    assert!(record.initiated_at.is_some());

    // Subsequent requests keep the original stamp.
    let stamped = record.initiated_at;
    get_with_cookie(&test.app, "/dashboard/usuario/", &cookie).await;
    let record = test.sessions.get(session_id(&cookie)).await.unwrap();
    assert_eq!(record.initiated_at, stamped);
}

#[tokio::test]
async fn test_session_for_deactivated_account_is_flushed() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;
    let cookie = sign_in(&test.app, "alice", "Correct1Password").await;

    test.accounts.lock_account("alice", Utc::now()).await.unwrap();

    // The request proceeds unauthenticated; the dashboard bounces to login.
    let response = get_with_cookie(&test.app, "/dashboard/usuario/", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login/"));
    assert!(test.sessions.get(session_id(&cookie)).await.is_none());
}
