//! Account entity and role definitions.
//!
//! # Core Types
//!
//! - [`Account`] - portal account as stored in the database
//! - [`NewAccount`] - insert payload used by registration and the CLI
//! - [`Role`] - closed set of the four portal roles
//!
//! Roles are persisted as their wire strings (`USUARIO`, `SECRETARIA`,
//! `OPERARIO`, `ADMINISTRADOR`) and parsed into [`Role`] at every
//! authorization decision point, so an account with a malformed role is a
//! data-integrity fault rather than a silently defaulted one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// A portal account.
///
/// Mutated by the lockout tracker and by login/logout events; never
/// hard-deleted. `is_active` is false whenever `locked_at` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the clear text.
    pub password: String,
    /// Wire string of one of the four roles; see [`Role::parse`].
    pub role: String,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    pub failed_login_attempts: i32,
    pub last_login_attempt: Option<DateTime<Utc>>,
    pub locked_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    /// Already hashed by the caller.
    pub password: String,
    pub role: Role,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
}

/// The four portal roles. Mutually exclusive; every account holds exactly
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Usuario,
    Secretaria,
    Operario,
    Administrador,
}

/// Raised when a stored role string does not name one of the four roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Usuario,
        Role::Secretaria,
        Role::Operario,
        Role::Administrador,
    ];

    /// The string persisted in the `role` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Usuario => "USUARIO",
            Role::Secretaria => "SECRETARIA",
            Role::Operario => "OPERARIO",
            Role::Administrador => "ADMINISTRADOR",
        }
    }

    /// Parses a stored role string. Anything outside the closed set is an
    /// error; callers decide whether that is fatal (it is, for
    /// authorization).
    pub fn parse(value: &str) -> Result<Role, UnknownRole> {
        match value {
            "USUARIO" => Ok(Role::Usuario),
            "SECRETARIA" => Ok(Role::Secretaria),
            "OPERARIO" => Ok(Role::Operario),
            "ADMINISTRADOR" => Ok(Role::Administrador),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
