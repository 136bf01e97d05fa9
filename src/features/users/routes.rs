use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserManagementService;

/// Create user management routes (all require admin access).
///
/// Paths are relative; the router is nested under `/api/usermanagement`.
pub fn routes(service: Arc<UserManagementService>) -> Router {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/role/{role}", get(handlers::list_users_by_role))
        .route("/users/status/{status}", get(handlers::list_users_by_status))
        .route("/statistics/summary", get(handlers::user_statistics))
        .route("/search/{term}", get(handlers::search_users))
        .route("/email/{email}", get(handlers::get_user_by_email))
        .route("/{user_id}", get(handlers::get_user))
        .route("/{user_id}/status", put(handlers::update_user_status))
        .route("/{user_id}/activate", put(handlers::activate_user))
        .route("/{user_id}/deactivate", put(handlers::deactivate_user))
        .route("/{user_id}/role", put(handlers::update_user_role))
        .with_state(service)
}
