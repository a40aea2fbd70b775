//! Route policy decision matrix, exercised through the public API.

use chrono::Utc;
use uuid::Uuid;

use apr_portal::config::policy::RoutePolicy;
use apr_portal::middleware::role::{RouteDecision, authorize};
use apr_portal::modules::users::model::{Account, Role};

fn account(role: &str) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        username: "worker".to_string(),
        email: "worker@example.com".to_string(),
        password: "hash".to_string(),
        role: role.to_string(),
        direccion: None,
        telefono: None,
        failed_login_attempts: 0,
        last_login_attempt: None,
        locked_at: None,
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_all_foreign_prefixes_deny() {
    let policy = RoutePolicy::default();

    for role in Role::ALL {
        let account = account(role.as_str());
        for owner in Role::ALL {
            if owner == role {
                continue;
            }
            for prefix in policy.prefixes(owner) {
                assert_eq!(
                    authorize(&policy, prefix, Some(&account)),
                    RouteDecision::Deny
                );
            }
        }
    }
}

#[test]
fn test_all_owned_prefixes_allow() {
    let policy = RoutePolicy::default();

    for role in Role::ALL {
        let account = account(role.as_str());
        for prefix in policy.prefixes(role) {
            assert_eq!(
                authorize(&policy, prefix, Some(&account)),
                RouteDecision::Allow
            );
        }
    }
}

#[test]
fn test_prefix_matching_is_prefix_based_not_exact() {
    let policy = RoutePolicy::default();
    let usuario = account("USUARIO");

    assert_eq!(
        authorize(&policy, "/reportes/2026/07/consumo.pdf", Some(&usuario)),
        RouteDecision::Deny
    );
    // A sibling path that merely shares characters is not owned.
    assert_eq!(
        authorize(&policy, "/reportes-publicos/", Some(&usuario)),
        RouteDecision::Allow
    );
}

#[test]
fn test_generic_dashboard_only_matches_exactly() {
    let policy = RoutePolicy::default();
    let admin = account("ADMINISTRADOR");

    assert_eq!(
        authorize(&policy, "/dashboard/", Some(&admin)),
        RouteDecision::Dashboard(Role::Administrador)
    );
    assert_eq!(
        authorize(&policy, "/dashboard/admin/", Some(&admin)),
        RouteDecision::Allow
    );
}

#[test]
fn test_unknown_role_is_an_error_not_a_default() {
    let policy = RoutePolicy::default();
    let broken = account("SUPERVISOR");

    assert_eq!(
        authorize(&policy, "/", Some(&broken)),
        RouteDecision::RoleError
    );
}
