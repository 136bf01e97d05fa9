use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public category routes (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .with_state(service)
}

/// Category administration, nested under `/api/admin`
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/categories",
            get(handlers::admin_list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::admin_get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route(
            "/categories/{id}/toggle-status",
            patch(handlers::toggle_category_status),
        )
        .with_state(service)
}
