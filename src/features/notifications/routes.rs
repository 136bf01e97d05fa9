use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Notification routes; every handler requires an authenticated user
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notification", get(handlers::list_notifications))
        .route(
            "/api/notification/read-all",
            put(handlers::mark_all_notifications_read),
        )
        .route(
            "/api/notification/{id}/read",
            put(handlers::mark_notification_read),
        )
        .with_state(service)
}
