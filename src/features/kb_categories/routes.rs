use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::kb_categories::handlers;
use crate::features::kb_categories::services::CategoryService;

/// Public routes: the active listing used by the KB UI
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/kb/categories", get(handlers::list_active_categories))
        .with_state(service)
}

/// Admin routes for category management (KB admin only)
///
/// Mount behind the bearer auth middleware; handlers enforce the role.
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/admin/kb/categories",
            get(handlers::list_all_categories).post(handlers::create_category),
        )
        .route(
            "/api/admin/kb/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}
