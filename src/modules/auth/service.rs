use validator::Validate;

use crate::modules::users::model::{Account, NewAccount, Role};
use crate::modules::users::store::{AccountStore, StoreError};
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

use super::model::{RegisterForm, validation_messages};

/// Why a registration was turned away.
#[derive(Debug)]
pub enum RegisterRejection {
    /// User-facing validation messages, flashed one by one.
    Invalid(Vec<String>),
    Internal(AppError),
}

impl From<StoreError> for RegisterRejection {
    fn from(err: StoreError) -> Self {
        RegisterRejection::Internal(AppError::internal(err))
    }
}

pub struct AuthService;

impl AuthService {
    /// Credential check: `Some(account)` only for a known, active account
    /// with a matching password. Locked accounts fail here even when the
    /// password is correct.
    pub async fn authenticate(
        accounts: &dyn AccountStore,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, AppError> {
        let Some(account) = accounts
            .lookup(username)
            .await
            .map_err(AppError::internal)?
        else {
            return Ok(None);
        };

        if !verify_password(password, &account.password)? {
            return Ok(None);
        }

        if !account.is_active {
            return Ok(None);
        }

        Ok(Some(account))
    }

    /// Registers a new account after the full validation set from the
    /// portal's registration form.
    pub async fn register(
        accounts: &dyn AccountStore,
        form: RegisterForm,
    ) -> Result<Account, RegisterRejection> {
        let mut messages = Vec::new();

        if let Err(errors) = form.validate() {
            messages.extend(validation_messages(&errors));
        }

        if !form
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            messages
                .push("Username may only contain letters, numbers and underscores.".to_string());
        }

        messages.extend(password_strength_errors(&form.password));

        if form.password != form.password_confirm {
            messages.push("Passwords do not match.".to_string());
        }

        let role = match form.role.as_deref() {
            None | Some("") => Role::Usuario,
            Some(value) => match Role::parse(value) {
                Ok(role) => role,
                Err(_) => {
                    messages.push("Select a valid role.".to_string());
                    Role::Usuario
                }
            },
        };

        if !messages.is_empty() {
            return Err(RegisterRejection::Invalid(messages));
        }

        if accounts.lookup(&form.username).await?.is_some() {
            messages.push("This username is already in use.".to_string());
        }
        if accounts.email_exists(&form.email).await? {
            messages.push("This email is already registered.".to_string());
        }
        if !messages.is_empty() {
            return Err(RegisterRejection::Invalid(messages));
        }

        let hashed = hash_password(&form.password).map_err(RegisterRejection::Internal)?;

        let new = NewAccount {
            username: form.username,
            email: form.email,
            password: hashed,
            role,
            telefono: none_if_blank(form.telefono),
            direccion: none_if_blank(form.direccion),
        };

        match accounts.create(new).await {
            Ok(account) => Ok(account),
            Err(StoreError::Duplicate) => Err(RegisterRejection::Invalid(vec![
                "This username or email is already registered.".to_string(),
            ])),
            Err(err) => Err(err.into()),
        }
    }
}

fn password_strength_errors(password: &str) -> Vec<String> {
    let mut messages = Vec::new();

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        messages.push("Password must contain at least one uppercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        messages.push("Password must contain at least one lowercase letter.".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        messages.push("Password must contain at least one number.".to_string());
    }

    messages
}

fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::memory::MemoryAccountStore;

    fn form(username: &str, email: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_string(),
            email: email.to_string(),
            password: "Str0ngPassword".to_string(),
            password_confirm: "Str0ngPassword".to_string(),
            role: None,
            telefono: None,
            direccion: None,
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_usuario() {
        let accounts = MemoryAccountStore::new();
        let account = AuthService::register(&accounts, form("alice", "alice@example.com"))
            .await
            .unwrap();

        assert_eq!(account.role, "USUARIO");
        assert!(account.is_active);
        assert_eq!(account.failed_login_attempts, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let accounts = MemoryAccountStore::new();
        let mut weak = form("alice", "alice@example.com");
        weak.password = "alllowercase1".to_string();
        weak.password_confirm = weak.password.clone();

        match AuthService::register(&accounts, weak).await {
            Err(RegisterRejection::Invalid(messages)) => {
                assert!(messages.iter().any(|m| m.contains("uppercase")));
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_password_mismatch() {
        let accounts = MemoryAccountStore::new();
        let mut mismatched = form("alice", "alice@example.com");
        mismatched.password_confirm = "Different1Password".to_string();

        match AuthService::register(&accounts, mismatched).await {
            Err(RegisterRejection::Invalid(messages)) => {
                assert!(messages.iter().any(|m| m.contains("do not match")));
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let accounts = MemoryAccountStore::new();
        AuthService::register(&accounts, form("alice", "alice@example.com"))
            .await
            .unwrap();

        match AuthService::register(&accounts, form("alice", "other@example.com")).await {
            Err(RegisterRejection::Invalid(messages)) => {
                assert!(messages.iter().any(|m| m.contains("already in use")));
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_accepts_explicit_role() {
        let accounts = MemoryAccountStore::new();
        let mut with_role = form("oper1", "oper1@example.com");
        with_role.role = Some("OPERARIO".to_string());

        let account = AuthService::register(&accounts, with_role).await.unwrap();
        assert_eq!(account.role, "OPERARIO");
    }

    #[tokio::test]
    async fn test_authenticate_checks_password_and_active_flag() {
        let accounts = MemoryAccountStore::new();
        AuthService::register(&accounts, form("alice", "alice@example.com"))
            .await
            .unwrap();

        assert!(
            AuthService::authenticate(&accounts, "alice", "Str0ngPassword")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            AuthService::authenticate(&accounts, "alice", "WrongPassword1")
                .await
                .unwrap()
                .is_none()
        );

        accounts
            .lock_account("alice", chrono::Utc::now())
            .await
            .unwrap();
        assert!(
            AuthService::authenticate(&accounts, "alice", "Str0ngPassword")
                .await
                .unwrap()
                .is_none(),
            "locked account must fail even with the correct password"
        );
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user_is_none() {
        let accounts = MemoryAccountStore::new();
        assert!(
            AuthService::authenticate(&accounts, "ghost", "whatever")
                .await
                .unwrap()
                .is_none()
        );
    }
}
