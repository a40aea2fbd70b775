//! Role-to-route policy.
//!
//! Built once at startup and injected through `AppState`; nothing mutates
//! it afterwards. Each role owns a set of path prefixes no other role may
//! enter, and the sets are disjoint by construction.

use crate::modules::users::model::Role;

/// Immutable route entitlement table plus the well-known redirect targets.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    table: [(Role, &'static [&'static str]); 4],
}

impl RoutePolicy {
    pub const INDEX: &'static str = "/";
    pub const LOGIN: &'static str = "/login/";
    pub const LOGOUT: &'static str = "/logout/";
    pub const REGISTER: &'static str = "/registro/";
    pub const GENERIC_DASHBOARD: &'static str = "/dashboard/";
    pub const ACCESS_DENIED: &'static str = "/acceso-denegado/";

    /// Role-specific dashboard routes.
    pub fn dashboard_path(&self, role: Role) -> &'static str {
        match role {
            Role::Administrador => "/dashboard/admin/",
            Role::Secretaria => "/dashboard/secretaria/",
            Role::Operario => "/dashboard/operario/",
            Role::Usuario => "/dashboard/usuario/",
        }
    }

    /// Path prefixes exclusively owned by a role.
    pub fn prefixes(&self, role: Role) -> &'static [&'static str] {
        self.table
            .iter()
            .find(|(owner, _)| *owner == role)
            .map(|(_, prefixes)| *prefixes)
            .unwrap_or(&[])
    }

    /// All (owner, prefixes) pairs.
    pub fn entries(&self) -> impl Iterator<Item = (Role, &'static [&'static str])> + '_ {
        self.table.iter().map(|(role, prefixes)| (*role, *prefixes))
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            table: [
                (
                    Role::Administrador,
                    &[
                        "/dashboard/admin/",
                        "/admin/",
                        "/configuraciones/",
                        "/reportes/",
                    ][..],
                ),
                (
                    Role::Secretaria,
                    &[
                        "/dashboard/secretaria/",
                        "/registro-consumo/",
                        "/generar-boletas/",
                        "/pagos/",
                    ][..],
                ),
                (
                    Role::Operario,
                    &[
                        "/dashboard/operario/",
                        "/mantenimiento/",
                        "/lecturas-medidor/",
                    ][..],
                ),
                (
                    Role::Usuario,
                    &["/dashboard/usuario/", "/mis-consumos/", "/mis-pagos/"][..],
                ),
            ],
        }
    }
}
