use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    access_denied, admin_dashboard, dashboard_fallback, index, operario_dashboard,
    secretaria_dashboard, usuario_dashboard,
};

pub fn init_dashboards_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/dashboard/", get(dashboard_fallback))
        .route("/dashboard/admin/", get(admin_dashboard))
        .route("/dashboard/secretaria/", get(secretaria_dashboard))
        .route("/dashboard/operario/", get(operario_dashboard))
        .route("/dashboard/usuario/", get(usuario_dashboard))
        .route("/acceso-denegado/", get(access_denied))
}
