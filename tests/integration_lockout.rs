//! Account lockout through the full login pipeline.

mod common;

use axum::http::StatusCode;

use apr_portal::modules::users::model::Role;
use apr_portal::modules::users::store::AccountStore;
use common::{build_app, create_account, location, post_login};

#[tokio::test]
async fn test_five_failed_logins_lock_the_account() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;

    for _ in 0..5 {
        let response = post_login(&test.app, "alice", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some("/login/"));
    }

    let account = test.accounts.lookup("alice").await.unwrap().unwrap();
    assert_eq!(account.failed_login_attempts, 5);
    assert!(!account.is_active);
    assert!(account.locked_at.is_some());

    // Sixth attempt with the correct password still fails.
    let response = post_login(&test.app, "alice", "Correct1Password").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login/"));

    let account = test.accounts.lookup("alice").await.unwrap().unwrap();
    assert!(!account.is_active);
    assert_eq!(account.failed_login_attempts, 6);
}

#[tokio::test]
async fn test_four_failed_logins_leave_the_account_usable() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;

    for _ in 0..4 {
        post_login(&test.app, "alice", "wrong-password").await;
    }

    let account = test.accounts.lookup("alice").await.unwrap().unwrap();
    assert_eq!(account.failed_login_attempts, 4);
    assert!(account.is_active);
    assert!(account.locked_at.is_none());

    // The next correct login goes through to the role dashboard.
    let response = post_login(&test.app, "alice", "Correct1Password").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard/usuario/"));
}

#[tokio::test]
async fn test_successful_login_resets_the_counter() {
    let test = build_app();
    create_account(&test.accounts, "alice", "Correct1Password", Role::Usuario).await;

    for _ in 0..3 {
        post_login(&test.app, "alice", "wrong-password").await;
    }
    post_login(&test.app, "alice", "Correct1Password").await;

    let account = test.accounts.lookup("alice").await.unwrap().unwrap();
    assert_eq!(account.failed_login_attempts, 0);
    assert!(account.last_login.is_some());
}

#[tokio::test]
async fn test_failed_login_for_unknown_username_changes_nothing() {
    let test = build_app();

    let response = post_login(&test.app, "ghost", "whatever").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login/"));
}
