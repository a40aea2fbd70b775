//! Operator console commands.
//!
//! Administrators are provisioned from the console, and locked accounts
//! only come back through `unlock-account` — lockout is terminal without
//! operator intervention.

use crate::modules::users::model::{NewAccount, Role};
use crate::modules::users::store::AccountStore;
use crate::utils::password::hash_password;

pub async fn create_admin(
    accounts: &dyn AccountStore,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let hashed = hash_password(password).map_err(|e| anyhow::anyhow!(e.error))?;

    accounts
        .create(NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password: hashed,
            role: Role::Administrador,
            direccion: None,
            telefono: None,
        })
        .await?;

    Ok(())
}

pub async fn unlock_account(accounts: &dyn AccountStore, username: &str) -> anyhow::Result<()> {
    if !accounts.unlock_account(username).await? {
        anyhow::bail!("no account named {username}");
    }

    Ok(())
}
